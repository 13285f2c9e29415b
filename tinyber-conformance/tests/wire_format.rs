use tinyber_conformance::shapes::{Drawing, Flag, Label, Marker, Path, Point, Shape};
use tinyber_conformance::trees::{Branch, Leaf, Level, Tree, Twig};
use tinyber_core::prelude::*;
use tinyber_core::{choice_alternative, decode_from_slice, encode_to_vec, enumerated_label};

fn point(x: i64, y: i64) -> Point {
    Point { x, y }
}

#[test]
fn test_point_wire_bytes() {
    let bytes = encode_to_vec(&point(3, 9)).unwrap();
    assert_eq!(bytes, [0x30, 0x06, 0x02, 0x01, 0x03, 0x02, 0x01, 0x09]);
    assert_eq!(decode_from_slice::<Point>(&bytes).unwrap(), point(3, 9));
}

#[test]
fn test_marker_matches_hand_built_reference() {
    let marker = Marker {
        label: Label(b"hi".to_vec()),
        visible: true,
        flag: Flag::On,
        at: point(1, 2),
    };
    let expected = [
        0x30, 0x12, // Marker
        0x04, 0x02, 0x68, 0x69, // label
        0x01, 0x01, 0xff, // visible
        0x0a, 0x01, 0x01, // flag
        0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02, // at
    ];
    assert_eq!(encode_to_vec(&marker).unwrap(), expected);
    assert_eq!(decode_from_slice::<Marker>(&expected).unwrap(), marker);
}

#[test]
fn test_choice_alternatives_use_context_tags() {
    assert_eq!(
        encode_to_vec(&Shape::Radius(5)).unwrap(),
        [0xa1, 0x03, 0x02, 0x01, 0x05]
    );
    assert_eq!(
        encode_to_vec(&Shape::Dot(point(3, 9))).unwrap(),
        [0xa0, 0x08, 0x30, 0x06, 0x02, 0x01, 0x03, 0x02, 0x01, 0x09]
    );
    assert_eq!(
        encode_to_vec(&Shape::Path(Path(vec![point(1, 2)]))).unwrap(),
        [
            0xa2, 0x0a, 0x30, 0x08, 0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02
        ]
    );
}

#[test]
fn test_drawing_wire_bytes() {
    let drawing = Drawing {
        shapes: vec![Shape::Radius(5)],
        flag: Flag::Off,
        note: Vec::new(),
        offset: -1,
    };
    let expected = [
        0x30, 0x0f, // Drawing
        0x30, 0x05, 0xa1, 0x03, 0x02, 0x01, 0x05, // shapes
        0x0a, 0x01, 0x00, // flag
        0x04, 0x00, // note
        0x02, 0x01, 0xff, // offset
    ];
    assert_eq!(encode_to_vec(&drawing).unwrap(), expected);
    assert_eq!(decode_from_slice::<Drawing>(&expected).unwrap(), drawing);
}

#[test]
fn test_nested_tree() {
    let tree = Tree {
        value: -1,
        branches: vec![Branch {
            value: 2,
            twigs: Vec::new(),
        }],
    };
    let expected = [
        0x30, 0x0c, 0x02, 0x01, 0xff, 0x30, 0x07, 0x30, 0x05, 0x02, 0x01, 0x02, 0x30, 0x00,
    ];
    assert_eq!(encode_to_vec(&tree).unwrap(), expected);
    assert_eq!(decode_from_slice::<Tree>(&expected).unwrap(), tree);
}

fn full_tree() -> Tree {
    let leaf = || Leaf { value: -128 };
    let twig = || Twig {
        value: 127,
        leaves: vec![leaf(), leaf()],
    };
    let branch = || Branch {
        value: 127,
        twigs: vec![twig(), twig()],
    };
    Tree {
        value: 127,
        branches: vec![branch(), branch()],
    }
}

#[test]
fn test_full_tree_fills_max_size_exactly() {
    let tree = full_tree();
    let bytes = encode_to_vec(&tree).unwrap();
    assert_eq!(bytes.len(), Tree::MAX_SIZE);
    assert_eq!(decode_from_slice::<Tree>(&bytes).unwrap(), tree);
}

#[test]
fn test_nesting_deeper_than_schema_rejected() {
    // A Twig where a Leaf is expected carries an extra SEQUENCE level.
    let twig = [0x30, 0x05, 0x02, 0x01, 0x01, 0x30, 0x00];
    assert_eq!(
        decode_from_slice::<Leaf>(&twig),
        Err(DecodeError::TrailingBytes { remaining: 2 })
    );
}

#[test]
fn test_path_below_minimum() {
    let bytes = encode_to_vec(&Path(Vec::new())).unwrap();
    assert_eq!(bytes, [0x30, 0x00]);
    assert_eq!(
        decode_from_slice::<Path>(&bytes),
        Err(DecodeError::CountOutOfRange {
            count: 0,
            min: 1,
            max: 3
        })
    );
}

#[test]
fn test_path_above_maximum() {
    let path = Path((0..4).map(|i| point(i, i)).collect());

    // The bound also caps the encoder sized from MAX_SIZE.
    assert!(matches!(
        encode_to_vec(&path),
        Err(EncodeError::Overflow { .. })
    ));

    let mut dst = Encoder::with_capacity(64);
    path.encode(&mut dst).unwrap();
    let bytes = dst.finish();
    assert_eq!(
        decode_from_slice::<Path>(&bytes),
        Err(DecodeError::CountOutOfRange {
            count: 4,
            min: 1,
            max: 3
        })
    );
}

#[test]
fn test_path_in_range_preserves_order() {
    let path = Path(vec![point(1, 2), point(3, 4), point(5, 6)]);
    let bytes = encode_to_vec(&path).unwrap();
    assert_eq!(&bytes[2..10], [0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02]);
    assert_eq!(decode_from_slice::<Path>(&bytes).unwrap(), path);
}

#[test]
fn test_unknown_choice_tag() {
    let bytes = [0xa5, 0x03, 0x02, 0x01, 0x01];
    assert_eq!(
        decode_from_slice::<Shape>(&bytes),
        Err(DecodeError::UnknownAlternative {
            tag: Tag::context(5)
        })
    );
}

#[test]
fn test_choice_rejects_universal_tag() {
    let bytes = [0x02, 0x01, 0x01];
    assert!(matches!(
        decode_from_slice::<Shape>(&bytes),
        Err(DecodeError::UnknownAlternative { .. })
    ));
}

#[test]
fn test_choice_alternative_bounds_apply() {
    // radius 2000 > 1000
    let bytes = [0xa1, 0x04, 0x02, 0x02, 0x07, 0xd0];
    assert_eq!(
        decode_from_slice::<Shape>(&bytes),
        Err(DecodeError::IntegerOutOfRange {
            value: 2000,
            min: 0,
            max: 1000
        })
    );
}

#[test]
fn test_integer_out_of_range() {
    let bytes = [0x30, 0x07, 0x02, 0x02, 0x01, 0x2c, 0x02, 0x01, 0x09];
    assert_eq!(
        decode_from_slice::<Point>(&bytes),
        Err(DecodeError::IntegerOutOfRange {
            value: 300,
            min: 0,
            max: 255
        })
    );
}

#[test]
fn test_octet_string_too_long() {
    let mut bytes = vec![0x04, 17];
    bytes.extend_from_slice(&[0u8; 17]);
    assert_eq!(
        decode_from_slice::<Label>(&bytes),
        Err(DecodeError::LengthOutOfRange {
            len: 17,
            min: 0,
            max: 16
        })
    );
}

#[test]
fn test_unknown_enumerated_value() {
    assert_eq!(
        decode_from_slice::<Flag>(&[0x0a, 0x01, 0x07]),
        Err(DecodeError::UnknownEnumerated { value: 7 })
    );
}

#[test]
fn test_wrong_tag_for_sequence() {
    assert_eq!(
        decode_from_slice::<Point>(&[0x31, 0x00]),
        Err(DecodeError::UnexpectedTag {
            expected: Tag::SEQUENCE,
            actual: Tag::from_raw(0x31)
        })
    );
}

#[test]
fn test_truncated_input() {
    assert!(matches!(
        decode_from_slice::<Point>(&[0x30, 0x06, 0x02, 0x01]),
        Err(DecodeError::Truncated { .. })
    ));
}

#[test]
fn test_trailing_bytes_rejected() {
    assert_eq!(
        decode_from_slice::<Flag>(&[0x0a, 0x01, 0x01, 0x00]),
        Err(DecodeError::TrailingBytes { remaining: 1 })
    );
}

#[test]
fn test_extra_field_inside_sequence_rejected() {
    let bytes = [0x30, 0x09, 0x02, 0x01, 0x03, 0x02, 0x01, 0x09, 0x01, 0x01, 0x00];
    assert_eq!(
        decode_from_slice::<Point>(&bytes),
        Err(DecodeError::TrailingBytes { remaining: 3 })
    );
}

#[test]
fn test_flag_tables() {
    assert_eq!(Flag::TAGS_F, [("off", 0), ("on", 1)]);
    assert_eq!(Flag::TAGS_R, [(0, "off"), (1, "on")]);
    assert_eq!(Flag::On.value(), 1);
    assert_eq!(Flag::from_value(0), Some(Flag::Off));
    assert_eq!(Flag::from_value(2), None);
    assert_eq!(enumerated_label::<Flag>(1), Some("on"));
    assert_ne!(enumerated_label::<Flag>(1), Some("off"));
}

#[test]
fn test_shape_tables_are_bijective() {
    assert_eq!(Shape::TAGS_F.len(), Shape::TAGS_R.len());
    for &(name, tag) in Shape::TAGS_F {
        assert_eq!(choice_alternative::<Shape>(tag), Some(name));
    }
    for &(tag, name) in Shape::TAGS_R {
        assert!(Shape::TAGS_F.contains(&(name, tag)));
    }
    assert_eq!(Shape::Radius(1).tag(), 1);
    assert_eq!(choice_alternative::<Shape>(2), Some("Path"));
}

#[test]
fn test_signed_enumerated() {
    for &(value, _) in Level::TAGS_R {
        let level = Level::from_value(value).unwrap();
        assert_eq!(level.value(), value);
    }
    assert_eq!(
        encode_to_vec(&Level::Below).unwrap(),
        [0x0a, 0x01, 0xff]
    );
    assert_eq!(
        decode_from_slice::<Level>(&[0x0a, 0x01, 0xff]).unwrap(),
        Level::Below
    );
}

#[test]
fn test_generated_constants() {
    assert_eq!(Point::CONSTRUCT, Construct::Sequence);
    assert_eq!(Path::CONSTRUCT, Construct::Asn1);
    assert_eq!(Shape::CONSTRUCT, Construct::Choice);
    assert_eq!(Flag::CONSTRUCT, Construct::Enumerated);
    assert_eq!(Point::MAX_SIZE, 10);
    assert_eq!(Path::MAX_SIZE, 32);
    assert_eq!(Marker::MAX_SIZE, 36);
    assert_eq!(Shape::MAX_SIZE, 34);
    assert_eq!(Drawing::MAX_SIZE, 165);
    assert_eq!(Leaf::MAX_SIZE, 5);
    assert_eq!(Twig::MAX_SIZE, 17);
    assert_eq!(Branch::MAX_SIZE, 41);
    assert_eq!(Tree::MAX_SIZE, 89);
}
