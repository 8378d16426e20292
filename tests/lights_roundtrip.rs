//! # Light File Session Test Suite
//!
//! End-to-end tests driving the light-placement adapter through a full
//! session: open a file from disk, edit through commands and direct
//! field writes, save, and check the bytes that land back on disk.
//!
//! ## Test Categories
//!
//! 1. **Open**: file-to-table projection and open failures
//! 2. **Edit and Save**: command edits reach the right file offsets
//! 3. **Safety**: overwrite gate and fixed-size rejections

use std::fs;
use std::path::{Path, PathBuf};

use binsheet::adapter::LightSet;
use binsheet::commands::CommandOutcome;
use binsheet::encoding::Writer;
use binsheet::{Session, Value};
use tempfile::tempdir;

// ============================================================================
// HELPERS
// ============================================================================

const FILE_SIZE: usize = 1448;
const LAMP_BASE: usize = 40;
const LAMP_SIZE: usize = 80;
const AMBIENT_BASE: usize = LAMP_BASE + 16 * LAMP_SIZE;

/// A plausible light file: header counts filled in, every lamp pointing
/// at its own ambient slot, distinct values per lamp.
fn light_bytes() -> Vec<u8> {
    let mut writer = Writer::with_capacity(FILE_SIZE);
    writer.write_bytes(b"LIGT");
    writer.write_u32(FILE_SIZE as u32);
    writer.write_u8(1);
    writer.write_bytes(&[0; 3]);
    writer.write_u32(0);
    writer.write_u16(16);
    writer.write_u16(16);
    writer.write_bytes(&[0; 4]);
    writer.write_bytes(&[0; 16]);

    for i in 0..16u16 {
        writer.write_bytes(b"LOBJ");
        writer.write_u32(LAMP_SIZE as u32);
        writer.write_u8(1);
        writer.write_bytes(&[0; 3]);
        writer.write_u32(0);
        writer.write_u16(0);
        writer.write_u8(2);
        writer.write_bytes(&[0]);
        writer.write_u16(i);
        writer.write_u16(0);
        for axis in 0..3u16 {
            writer.write_f32(f32::from(i) + f32::from(axis) * 0.25);
        }
        for axis in 0..3u16 {
            writer.write_f32(-f32::from(i) - f32::from(axis));
        }
        writer.write_f32(1.0);
        writer.write_bytes(&[i as u8, 0x20, 0x30, 0xFF]);
        writer.write_u32(0);
        writer.write_f32(0.0);
        writer.write_f32(0.0);
        writer.write_f32(0.0);
        writer.write_bytes(&[0; 8]);
    }

    for i in 0..16u8 {
        writer.write_bytes(&[i, 2 * i, 3 * i, 0xFF]);
        writer.write_bytes(&[0; 4]);
    }

    let bytes = writer.into_bytes();
    assert_eq!(bytes.len(), FILE_SIZE);
    bytes
}

fn write_light_file(dir: &Path) -> PathBuf {
    let path = dir.join("stage.light");
    fs::write(&path, light_bytes()).expect("writing fixture");
    path
}

fn apply_ok(session: &mut Session, line: &str) {
    match session.apply(line) {
        CommandOutcome::Applied => {}
        CommandOutcome::Rejected(msg) => panic!("command '{}' rejected: {}", line, msg),
    }
}

fn open_err(path: &Path) -> eyre::Report {
    match Session::open(Box::new(LightSet), path) {
        Ok(_) => panic!("opening '{}' should fail", path.display()),
        Err(err) => err,
    }
}

// ============================================================================
// OPEN
// ============================================================================

#[test]
fn open_projects_lamps_into_the_table() {
    let dir = tempdir().expect("tempdir");
    let path = write_light_file(dir.path());

    let session = Session::open(Box::new(LightSet), &path).expect("opening session");
    let table = session.table();

    assert_eq!(table.row_count(), 16);
    assert!(table.is_fixed_size());
    assert_eq!(table.value(5, 0).expect("Lig"), Value::Uint(2));
    assert_eq!(table.value(5, 1).expect("AmI"), Value::Uint(5));
    assert_eq!(table.value(5, 2).expect("AmR"), Value::Uint(5));
    assert_eq!(table.value(5, 3).expect("AmG"), Value::Uint(10));
    assert_eq!(table.value(5, 6).expect("OriginX"), Value::Float(5.0));
    assert_eq!(table.value(5, 7).expect("OriginY"), Value::Float(5.25));
    assert_eq!(table.value(5, 9).expect("DestinX"), Value::Float(-5.0));
    assert_eq!(table.value(5, 12).expect("Effect"), Value::Float(1.0));
    assert_eq!(table.value(5, 13).expect("LiR"), Value::Uint(5));
}

#[test]
fn open_rejects_wrong_sized_files() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("short.light");
    fs::write(&path, [0u8; 100]).expect("writing fixture");

    let err = open_err(&path);
    assert!(
        format!("{:#}", err).contains("not a lightset file"),
        "unexpected error: {:#}",
        err
    );
}

#[test]
fn open_reports_missing_files() {
    let dir = tempdir().expect("tempdir");
    let err = open_err(&dir.path().join("absent.light"));
    assert!(
        format!("{:#}", err).contains("failed to read"),
        "unexpected error: {:#}",
        err
    );
}

// ============================================================================
// EDIT AND SAVE
// ============================================================================

#[test]
fn untouched_session_saves_byte_identically() {
    let dir = tempdir().expect("tempdir");
    let path = write_light_file(dir.path());
    let dest = dir.path().join("copy.light");

    let mut session = Session::open(Box::new(LightSet), &path).expect("opening session");
    session.save(&dest, false).expect("saving");

    assert_eq!(fs::read(&dest).expect("re-reading"), light_bytes());
}

#[test]
fn command_edits_reach_the_saved_file() {
    let dir = tempdir().expect("tempdir");
    let path = write_light_file(dir.path());
    let dest = dir.path().join("edited.light");

    let mut session = Session::open(Box::new(LightSet), &path).expect("opening session");
    apply_ok(&mut session, "Set Effect To 2.5");
    apply_ok(&mut session, "Set Lig 0-3 To 9");
    session.save(&dest, false).expect("saving");

    let bytes = fs::read(&dest).expect("re-reading");
    assert_eq!(bytes.len(), FILE_SIZE);
    for lamp in 0..16 {
        // 2.5 encodes as 0x40200000
        let at = LAMP_BASE + lamp * LAMP_SIZE + 48;
        assert_eq!(&bytes[at..at + 4], &[0x40, 0x20, 0x00, 0x00]);
    }
    for lamp in 0..4 {
        assert_eq!(bytes[LAMP_BASE + lamp * LAMP_SIZE + 18], 9);
    }
    assert_eq!(bytes[LAMP_BASE + 4 * LAMP_SIZE + 18], 2);
}

#[test]
fn ambient_recolor_lands_in_the_indexed_slot() {
    let dir = tempdir().expect("tempdir");
    let path = write_light_file(dir.path());
    let dest = dir.path().join("recolored.light");

    // Lamp 15 flushes last, so its ambient write is the one that
    // survives when two rows point at the same slot.
    let mut session = Session::open(Box::new(LightSet), &path).expect("opening session");
    apply_ok(&mut session, "Set AmI 15 To 9");
    apply_ok(&mut session, "Set AmR-AmA 15 To 200");
    session.save(&dest, false).expect("saving");

    let bytes = fs::read(&dest).expect("re-reading");
    let lamp15 = LAMP_BASE + 15 * LAMP_SIZE;
    assert_eq!(&bytes[lamp15 + 20..lamp15 + 22], &[0x00, 0x09]);
    let slot9 = AMBIENT_BASE + 9 * 8;
    assert_eq!(&bytes[slot9..slot9 + 4], &[200, 200, 200, 200]);
    // slot 15 is no longer referenced and keeps its original color
    let slot15 = AMBIENT_BASE + 15 * 8;
    assert_eq!(&bytes[slot15..slot15 + 4], &[15, 30, 45, 0xFF]);
}

#[test]
fn set_field_edits_survive_the_save() {
    let dir = tempdir().expect("tempdir");
    let path = write_light_file(dir.path());
    let dest = dir.path().join("oneshot.light");

    let mut session = Session::open(Box::new(LightSet), &path).expect("opening session");
    session
        .set_field("lamp", 3, "kind", 0, "5")
        .expect("setting lamp field");
    session
        .set_field("lightset", 0, "version", 0, "3")
        .expect("setting header field");

    // the table projection reflects the edit immediately
    assert_eq!(session.table().value(3, 0).expect("Lig"), Value::Uint(5));

    session.save(&dest, false).expect("saving");
    let bytes = fs::read(&dest).expect("re-reading");
    assert_eq!(bytes[LAMP_BASE + 3 * LAMP_SIZE + 18], 5);
    assert_eq!(bytes[8], 3);
}

#[test]
fn set_field_rejects_unknown_names() {
    let dir = tempdir().expect("tempdir");
    let path = write_light_file(dir.path());
    let mut session = Session::open(Box::new(LightSet), &path).expect("opening session");

    let err = session
        .set_field("lamp", 0, "bogus", 0, "1")
        .expect_err("unknown key should fail");
    assert!(err.to_string().contains("bogus"), "unexpected: {}", err);

    let err = session
        .set_field("lamp", 99, "kind", 0, "1")
        .expect_err("bad index should fail");
    assert!(
        err.to_string().contains("out of range"),
        "unexpected: {}",
        err
    );

    let err = session
        .set_field("walls", 0, "kind", 0, "1")
        .expect_err("unknown section should fail");
    assert!(err.to_string().contains("walls"), "unexpected: {}", err);
}

// ============================================================================
// SAFETY
// ============================================================================

#[test]
fn save_refuses_to_overwrite_without_the_flag() {
    let dir = tempdir().expect("tempdir");
    let path = write_light_file(dir.path());

    let mut session = Session::open(Box::new(LightSet), &path).expect("opening session");
    let err = session
        .save(&path, false)
        .expect_err("in-place save should fail");
    assert!(
        err.to_string().contains("already exists"),
        "unexpected: {}",
        err
    );

    session.save(&path, true).expect("overwrite save");
    assert_eq!(fs::read(&path).expect("re-reading").len(), FILE_SIZE);
}

#[test]
fn resizing_commands_rejected_on_the_fixed_table() {
    let dir = tempdir().expect("tempdir");
    let path = write_light_file(dir.path());
    let mut session = Session::open(Box::new(LightSet), &path).expect("opening session");

    for line in ["Add Rows", "Delete Rows", "Insert Rows At 0"] {
        match session.apply(line) {
            CommandOutcome::Applied => panic!("'{}' should be rejected", line),
            CommandOutcome::Rejected(msg) => {
                assert!(msg.contains("cannot"), "'{}' gave: {}", line, msg)
            }
        }
    }
    assert_eq!(session.table().row_count(), 16);
}
