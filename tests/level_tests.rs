#![cfg(feature = "level")]

use std::io::{Read, Write};

use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use nbt_inplace::{
    Error, TagID,
    level::{GameType, LEVEL_FILE_NAME, LevelData, LevelError},
};

fn named(tag: TagID, name: &str, payload: &[u8]) -> Vec<u8> {
    let mut data = vec![tag as u8];
    data.extend_from_slice(&(name.len() as u16).to_be_bytes());
    data.extend_from_slice(name.as_bytes());
    data.extend_from_slice(payload);
    data
}

fn level_nbt(game_type: u32, data_children: &[Vec<u8>]) -> Vec<u8> {
    let mut inner = named(TagID::Int, "GameType", &game_type.to_be_bytes());
    let mut name = 5u16.to_be_bytes().to_vec();
    name.extend_from_slice(b"World");
    inner.extend(named(TagID::String, "LevelName", &name));
    for child in data_children {
        inner.extend_from_slice(child);
    }
    inner.push(0);

    let mut data = vec![0x0A, 0x00, 0x00];
    data.extend(named(TagID::Compound, "Data", &inner));
    data.push(0);
    data
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn gunzip(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    GzDecoder::new(data).read_to_end(&mut out).unwrap();
    out
}

#[test]
fn test_read_level() {
    let spawn = named(TagID::Int, "SpawnX", &(-16i32).to_be_bytes());
    let level = LevelData::from_gzip(&gzip(&level_nbt(1, &[spawn]))).unwrap();
    assert_eq!(level.game_type().unwrap(), GameType::Creative as u32);
    assert_eq!(level.level_name().unwrap(), "World");
    assert_eq!(
        level
            .document()
            .get(&["Data", "SpawnX"])
            .unwrap()
            .value()
            .as_int(),
        Some((-16i32) as u32)
    );
}

#[test]
fn test_set_game_type_round_trip() {
    let source = level_nbt(0, &[]);
    let mut level = LevelData::from_gzip(&gzip(&source)).unwrap();
    assert_eq!(level.game_type().unwrap(), GameType::Survival as u32);

    level.set_game_type(GameType::Creative).unwrap();
    assert_eq!(level.game_type().unwrap(), GameType::Creative as u32);

    let packed = level.to_gzip().unwrap();
    let unpacked = gunzip(&packed);
    assert_eq!(unpacked.len(), source.len());
    let diff: Vec<_> = (0..source.len())
        .filter(|&i| source[i] != unpacked[i])
        .collect();
    assert_eq!(diff.len(), 1);
    assert_eq!(unpacked[diff[0]], 1);

    let reloaded = LevelData::from_gzip(&packed).unwrap();
    assert_eq!(reloaded.game_type().unwrap(), 1);
}

#[test]
fn test_gzip_header() {
    let level = LevelData::from_nbt(level_nbt(0, &[])).unwrap();
    let packed = level.to_gzip().unwrap();
    assert_eq!(&packed[..2], &[0x1F, 0x8B]);
    // FNAME flag set, OS byte is FAT.
    assert_eq!(packed[3] & 0x08, 0x08);
    assert_eq!(packed[9], 0);
    let name_start = 10;
    let name_end = name_start + LEVEL_FILE_NAME.len();
    assert_eq!(&packed[name_start..name_end], LEVEL_FILE_NAME.as_bytes());
    assert_eq!(packed[name_end], 0);
}

#[test]
fn test_game_type_values() {
    assert_eq!(GameType::try_from(0i64).unwrap(), GameType::Survival);
    assert_eq!(GameType::try_from(1i64).unwrap(), GameType::Creative);
    for bad in [-1i64, 2, 3, 256] {
        match GameType::try_from(bad) {
            Err(LevelError::InvalidGameType(value)) => assert_eq!(value, bad),
            other => panic!("expected InvalidGameType, got {other:?}"),
        }
    }
}

#[test]
fn test_other_stored_game_types_are_readable() {
    for stored in [2u32, 3] {
        let mut level = LevelData::from_gzip(&gzip(&level_nbt(stored, &[]))).unwrap();
        assert_eq!(level.game_type().unwrap(), stored);

        level.set_game_type(GameType::Creative).unwrap();
        assert_eq!(level.game_type().unwrap(), 1);
    }
}

#[test]
fn test_not_gzip() {
    match LevelData::from_gzip(&level_nbt(0, &[])) {
        Err(LevelError::NotALevel(_)) => {}
        other => panic!("expected NotALevel, got {:?}", other.err()),
    }
}

#[test]
fn test_missing_fields() {
    let mut data = vec![0x0A, 0x00, 0x00];
    let mut inner = named(TagID::Int, "GameType", &0u32.to_be_bytes());
    inner.push(0);
    data.extend(named(TagID::Compound, "Data", &inner));
    data.push(0);

    match LevelData::from_nbt(data) {
        Err(LevelError::NotALevel(reason)) => assert!(reason.contains("LevelName")),
        other => panic!("expected NotALevel, got {:?}", other.err()),
    }

    match LevelData::from_nbt(vec![0x0A, 0x00, 0x00, 0x00]) {
        Err(LevelError::NotALevel(reason)) => assert!(reason.contains("Data")),
        other => panic!("expected NotALevel, got {:?}", other.err()),
    }
}

#[test]
fn test_codec_error_is_wrapped() {
    match LevelData::from_nbt(vec![0x01, 0x00, 0x00, 0x05]) {
        Err(LevelError::NotALevel(reason)) => {
            assert_eq!(reason, Error::MalformedFormat(0x01).to_string())
        }
        other => panic!("expected NotALevel, got {:?}", other.err()),
    }
}

#[test]
fn test_game_type_stored_as_byte_is_still_writable() {
    let mut inner = named(TagID::Byte, "GameType", &[0]);
    let mut name = 1u16.to_be_bytes().to_vec();
    name.push(b'w');
    inner.extend(named(TagID::String, "LevelName", &name));
    inner.push(0);
    let mut data = vec![0x0A, 0x00, 0x00];
    data.extend(named(TagID::Compound, "Data", &inner));
    data.push(0);

    let mut level = LevelData::from_nbt(data).unwrap();
    level.set_game_type(GameType::Creative).unwrap();
    assert_eq!(
        level
            .document()
            .get(&["Data", "GameType"])
            .unwrap()
            .value()
            .as_byte(),
        Some(1)
    );
    // Reading requires an Int tag.
    assert!(matches!(level.game_type(), Err(LevelError::NotALevel(_))));
}

#[test]
fn test_level_error_source() {
    use std::error::Error as _;

    let error = LevelError::from(Error::TruncatedInput);
    assert!(error.source().is_some());
    assert_eq!(error.to_string(), "unexpected end of input");
    assert!(LevelError::InvalidGameType(5).source().is_none());
}
