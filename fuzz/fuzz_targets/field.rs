#![no_main]

use libfuzzer_sys::fuzz_target;
use stark_curve::FieldElement;

fuzz_target!(|data: [[u8; 32]; 3]| {
    let [a, b, c] = data.map(|bytes| FieldElement::from_bytes_be_reduced(&bytes));

    assert_eq!(a + b, b + a);
    assert_eq!(a * b, b * a);
    assert_eq!((a + b) + c, a + (b + c));
    assert_eq!(a * (b + c), a * b + a * c);
    assert_eq!(a - a, FieldElement::ZERO);

    let inverse = a.invert();
    if bool::from(inverse.is_some()) {
        assert_eq!(a * inverse.unwrap(), FieldElement::ONE);
    } else {
        assert_eq!(a, FieldElement::ZERO);
    }

    let root = (a * a).sqrt();
    assert!(bool::from(root.is_some()));
    let root = root.unwrap();
    assert_eq!(root * root, a * a);

    let bytes = a.to_bytes_be();
    assert_eq!(FieldElement::from_bytes_be(&bytes).unwrap(), a);
});
