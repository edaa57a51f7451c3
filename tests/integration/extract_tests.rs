//! End-to-end extraction tests.
//!
//! Tests verify:
//! - Tags of all three directories come back renamed and decoded
//! - Little-endian and big-endian blocks give identical results
//! - JPEG, bare TIFF and bare EXIF payload containers are equivalent
//! - Malformed or truncated metadata degrades without panics
//! - GPS coordinates are derived only from complete data

use exif_probe::{extract_exif, ExifData, ExifError, TagValue};

use super::test_utils::{
    camera_block, camera_exif_ifd, camera_gps_ifd, camera_ifd0, create_test_jpeg, exif_payload,
    insert_app_segment, is_valid_jpeg, jpeg_with_exif, ByteOrderType, ExifBuilder, IfdBuilder,
    PointerEncoding, Value, EXIF_IFD_POINTER,
};

fn extract(data: &[u8]) -> ExifData {
    extract_exif(data)
        .expect("extraction should not fail")
        .expect("metadata should be present")
}

fn text(s: &str) -> TagValue {
    TagValue::Str(s.to_string())
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

// =============================================================================
// Round Trip
// =============================================================================

#[test]
fn test_jpeg_round_trip() {
    let jpeg = jpeg_with_exif(&camera_block(ByteOrderType::LittleEndian));
    assert!(is_valid_jpeg(&jpeg));

    let exif = extract(&jpeg);

    // IFD0
    assert_eq!(exif.get("Make"), Some(&text("Canon")));
    assert_eq!(exif.get("Model"), Some(&text("Canon EOS 5D Mark IV")));
    assert_eq!(exif.get("Orientation"), Some(&TagValue::Num(6.0)));
    assert_eq!(exif.get("XResolution"), Some(&TagValue::Num(72.0)));
    assert_eq!(exif.get("DateTime"), Some(&text("2023:06:15 14:32:10")));
    assert!(exif.get("ExifIFDPointer").is_some_and(|v| v.as_offset().is_some()));
    assert!(exif.get("GPSInfoIFDPointer").is_some_and(|v| v.as_offset().is_some()));

    // Exif IFD, merged flat
    assert_eq!(exif.get("ExposureTime"), Some(&TagValue::Num(0.005)));
    assert_eq!(exif.get("FNumber"), Some(&TagValue::Num(2.8)));
    assert_eq!(exif.get("ISOSpeedRatings"), Some(&TagValue::Num(400.0)));
    assert_eq!(exif.get("DateTimeOriginal"), Some(&text("2023:06:15 14:32:09")));
    assert_eq!(exif.get("Flash"), Some(&TagValue::Num(25.0)));
    assert_eq!(exif.get("FocalLength"), Some(&TagValue::Num(50.0)));
    assert_eq!(exif.get("PixelXDimension"), Some(&TagValue::Num(6720.0)));
    assert_eq!(exif.get("PixelYDimension"), Some(&TagValue::Num(4480.0)));
    assert_eq!(exif.get("LensModel"), Some(&text("EF50mm f/1.8 STM")));
    assert_eq!(exif.get("ExifVersion"), Some(&TagValue::Bytes(b"0231".to_vec())));

    // 5 IFD0 tags + 2 pointers + 10 Exif tags
    assert_eq!(exif.tags.len(), 17);

    // GPS IFD, nested
    let gps = exif.gps.as_ref().expect("GPS block");
    assert_eq!(gps.tags.get("GPSLatitudeRef"), Some(&text("N")));
    assert_eq!(
        gps.tags.get("GPSLatitude"),
        Some(&TagValue::NumSeq(vec![37.0, 25.0, 19.07]))
    );
    assert_eq!(gps.tags.get("GPSLongitudeRef"), Some(&text("W")));
    assert_eq!(
        gps.tags.get("GPSLongitude"),
        Some(&TagValue::NumSeq(vec![122.0, 5.0, 0.0]))
    );

    let coordinate = exif.coordinate().expect("coordinate");
    assert_close(coordinate.latitude, 37.0 + 25.0 / 60.0 + 19.07 / 3600.0);
    assert_close(coordinate.longitude, -(122.0 + 5.0 / 60.0));
}

#[test]
fn test_json_shape() {
    let exif = extract(&jpeg_with_exif(&camera_block(ByteOrderType::BigEndian)));
    let json = serde_json::to_value(&exif).unwrap();

    assert_eq!(json["Make"], "Canon");
    assert_eq!(json["Orientation"], 6);
    assert_eq!(json["FNumber"], 2.8);
    assert_eq!(json["ExifVersion"], serde_json::json!([48, 50, 51, 49]));
    assert_eq!(json["GPS"]["GPSLatitudeRef"], "N");
    assert_eq!(json["GPS"]["GPSLongitude"], serde_json::json!([122, 5, 0]));
    assert!(json["GPS"]["Latitude"].as_f64().unwrap() > 37.0);
    assert!(json["GPS"]["Longitude"].as_f64().unwrap() < -122.0);

    // GPS tags are not duplicated into the flat map
    assert!(json.get("GPSLatitude").is_none());
}

// =============================================================================
// Byte Order and Containers
// =============================================================================

#[test]
fn test_byte_order_invariance() {
    let little = extract(&camera_block(ByteOrderType::LittleEndian));
    let big = extract(&camera_block(ByteOrderType::BigEndian));

    assert_eq!(little, big);
}

#[test]
fn test_containers_are_equivalent() {
    let block = camera_block(ByteOrderType::BigEndian);

    let from_tiff = extract(&block);
    let from_payload = extract(&exif_payload(&block));
    let from_jpeg = extract(&jpeg_with_exif(&block));

    assert_eq!(from_tiff, from_payload);
    assert_eq!(from_tiff, from_jpeg);
}

#[test]
fn test_non_exif_app1_is_skipped() {
    let jpeg = jpeg_with_exif(&camera_block(ByteOrderType::LittleEndian));
    let xmp = b"http://ns.adobe.com/xap/1.0/\0<x:xmpmeta/>";
    let jpeg = insert_app_segment(&jpeg, 0xE1, xmp);

    assert_eq!(extract(&jpeg).get("Make"), Some(&text("Canon")));
}

// =============================================================================
// Absent Metadata and Invalid Input
// =============================================================================

#[test]
fn test_jpeg_without_exif() {
    let jpeg = create_test_jpeg(16, 16, 90);
    assert_eq!(extract_exif(&jpeg), Ok(None));
}

#[test]
fn test_empty_input_is_rejected() {
    assert!(matches!(extract_exif(&[]), Err(ExifError::InvalidInput(_))));
}

#[test]
fn test_invalid_tiff_header_in_segment() {
    let mut block = camera_block(ByteOrderType::LittleEndian);
    block[2] = 43; // BigTIFF version, not handled

    assert_eq!(extract_exif(&jpeg_with_exif(&block)), Ok(None));
}

#[test]
fn test_first_ifd_outside_block() {
    let mut block = camera_block(ByteOrderType::LittleEndian);
    block[4..8].copy_from_slice(&0x0001_0000u32.to_le_bytes());

    assert_eq!(extract_exif(&block), Ok(None));
}

// =============================================================================
// Malformed Values
// =============================================================================

#[test]
fn test_zero_denominators() {
    let block = ExifBuilder::new()
        .ifd0(camera_ifd0())
        .exif(camera_exif_ifd().add_entry(0x829A, Value::Rational(vec![(1, 0)])))
        .gps(
            camera_gps_ifd()
                .add_entry(0x0002, Value::Rational(vec![(37, 1), (0, 0), (30, 1)])),
        )
        .build();

    let exif = extract(&block);

    // Single rational: the entry fails on its own
    assert_eq!(exif.get("ExposureTime"), Some(&TagValue::Null));
    assert_eq!(exif.get("FNumber"), Some(&TagValue::Num(2.8)));

    // Sequence: the offending element is dropped
    let gps = exif.gps.as_ref().unwrap();
    assert_eq!(
        gps.tags.get("GPSLatitude"),
        Some(&TagValue::NumSeq(vec![37.0, 30.0]))
    );
    assert_close(exif.coordinate().unwrap().latitude, 37.5);

    for value in exif.tags.values().chain(gps.tags.values()) {
        if let Some(numbers) = value.to_numbers() {
            assert!(numbers.iter().all(|n| n.is_finite()));
        }
    }
}

#[test]
fn test_value_offset_out_of_range() {
    let block = ExifBuilder::new()
        .ifd0(camera_ifd0().add_entry(
            0x010E,
            Value::Raw {
                field_type: 2,
                count: 100,
                bytes: 0xFFFF_0000u32.to_le_bytes().to_vec(),
            },
        ))
        .build();

    let exif = extract(&block);
    assert_eq!(exif.get("ImageDescription"), Some(&TagValue::Null));
    assert_eq!(exif.get("Make"), Some(&text("Canon")));
}

#[test]
fn test_unknown_type_and_oversized_raw_values() {
    let block = ExifBuilder::new()
        .ifd0(
            camera_ifd0()
                .add_entry(
                    0xC4A5,
                    Value::Raw {
                        field_type: 13,
                        count: 2,
                        bytes: vec![0xAB, 0xCD],
                    },
                )
                .add_entry(0x8298, Value::Undefined(vec![7; 1000])),
        )
        .build();

    let exif = extract(&block);
    assert_eq!(
        exif.get("Unknown_0xC4A5"),
        Some(&TagValue::Bytes(vec![0xAB, 0xCD]))
    );
    assert_eq!(exif.get("Copyright"), Some(&TagValue::Bytes(vec![7; 256])));
}

#[test]
fn test_truncation_never_panics() {
    for data in [
        camera_block(ByteOrderType::LittleEndian),
        jpeg_with_exif(&camera_block(ByteOrderType::BigEndian)),
    ] {
        let full = extract(&data);
        let full_gps = full.gps.as_ref().unwrap();

        for cut in 1..data.len() {
            let Some(partial) = extract_exif(&data[..cut]).unwrap() else {
                continue;
            };

            for (name, value) in &partial.tags {
                assert!(
                    value.is_null() || full.get(name) == Some(value),
                    "cut {}: {} = {:?}",
                    cut,
                    name,
                    value
                );
            }
            if let Some(gps) = &partial.gps {
                for (name, value) in &gps.tags {
                    assert!(value.is_null() || full_gps.tags.get(name) == Some(value));
                }
            }
        }
    }
}

#[test]
fn test_truncated_block_keeps_leading_entries() {
    let block = ExifBuilder::new().ifd0(camera_ifd0()).build();

    // Cut inside the third entry (Orientation). Make and Model point past
    // the cut, so all three are named but undecodable.
    let cut = 8 + 2 + 12 * 2 + 6;
    let exif = extract(&block[..cut]);

    assert_eq!(exif.get("Make"), Some(&TagValue::Null));
    assert_eq!(exif.get("Model"), Some(&TagValue::Null));
    assert_eq!(exif.get("Orientation"), Some(&TagValue::Null));
    assert!(exif.get("XResolution").is_none());
}

// =============================================================================
// Pointers
// =============================================================================

#[test]
fn test_pointer_encodings() {
    for encoding in [
        PointerEncoding::Long,
        PointerEncoding::Short,
        PointerEncoding::RationalPair,
    ] {
        let block = ExifBuilder::new()
            .with_pointer_encoding(encoding)
            .ifd0(camera_ifd0())
            .exif(camera_exif_ifd())
            .gps(camera_gps_ifd())
            .build();

        let exif = extract(&block);
        assert_eq!(exif.get("Flash"), Some(&TagValue::Num(25.0)), "{:?}", encoding);
        assert!(exif.coordinate().is_some(), "{:?}", encoding);
    }
}

#[test]
fn test_zero_pointer_is_not_followed() {
    let block = ExifBuilder::new()
        .with_pointer_encoding(PointerEncoding::Zero)
        .ifd0(camera_ifd0())
        .exif(camera_exif_ifd())
        .gps(camera_gps_ifd())
        .build();

    let exif = extract(&block);
    assert_eq!(exif.get("ExifIFDPointer"), Some(&TagValue::Num(0.0)));
    assert!(exif.get("Flash").is_none());
    assert!(exif.gps.is_none());
}

#[test]
fn test_text_pointer_is_ignored() {
    let block = ExifBuilder::new()
        .ifd0(camera_ifd0().add_entry(EXIF_IFD_POINTER, Value::ascii("8")))
        .build();

    let exif = extract(&block);
    assert_eq!(exif.get("ExifIFDPointer"), Some(&text("8")));
    assert_eq!(exif.tags.len(), 6);
}

#[test]
fn test_self_referencing_pointer_terminates() {
    // Exif pointer back at IFD0: read once under Exif names, never looped
    let block = ExifBuilder::new()
        .ifd0(camera_ifd0().add_entry(EXIF_IFD_POINTER, Value::Long(vec![8])))
        .build();

    let exif = extract(&block);
    assert_eq!(exif.get("Make"), Some(&text("Canon")));
    assert_eq!(exif.get("Unknown_0x010F"), Some(&text("Canon")));
    assert_eq!(exif.get("Unknown_0x8769"), Some(&TagValue::Num(8.0)));
}

// =============================================================================
// GPS
// =============================================================================

#[test]
fn test_partial_gps_has_no_coordinate() {
    let block = ExifBuilder::new()
        .ifd0(camera_ifd0())
        .gps(
            IfdBuilder::new()
                .add_entry(0x0001, Value::ascii("N"))
                .add_entry(0x0002, Value::Rational(vec![(37, 1), (25, 1), (1907, 100)])),
        )
        .build();

    let exif = extract(&block);
    let gps = exif.gps.as_ref().expect("GPS block");
    assert_eq!(gps.tags.len(), 2);
    assert_eq!(exif.coordinate(), None);

    let json = serde_json::to_value(&exif).unwrap();
    assert!(json["GPS"].get("Latitude").is_none());
    assert!(json["GPS"].get("Longitude").is_none());
}

#[test]
fn test_southern_eastern_hemisphere() {
    let block = ExifBuilder::new()
        .with_byte_order(ByteOrderType::BigEndian)
        .ifd0(camera_ifd0())
        .gps(
            IfdBuilder::new()
                .add_entry(0x0001, Value::ascii("S"))
                .add_entry(0x0002, Value::Rational(vec![(33, 1), (51, 1), (3552, 100)]))
                .add_entry(0x0003, Value::ascii("E"))
                .add_entry(0x0004, Value::Rational(vec![(151, 1), (12, 1), (3360, 100)])),
        )
        .build();

    let coordinate = extract(&block).coordinate().unwrap();
    assert_close(coordinate.latitude, -(33.0 + 51.0 / 60.0 + 35.52 / 3600.0));
    assert_close(coordinate.longitude, 151.0 + 12.0 / 60.0 + 33.6 / 3600.0);
}
