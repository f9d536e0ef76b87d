//! End-to-end checks of the shell verbs against the file store: each test
//! drives `dispatch` with a command line and inspects the store afterwards.

#![no_std]
#![no_main]
#![feature(custom_test_frameworks)]
#![test_runner(cinder_os::test_runner)]
#![reexport_test_harness_main = "test_main"]

use bootloader::{BootInfo, entry_point};
use cinder_os::fs;
use cinder_os::shell::commands::dispatch;
use core::panic::PanicInfo;

entry_point!(main);

fn main(_boot_info: &'static BootInfo) -> ! {
    cinder_os::init();
    test_main();
    cinder_os::hlt_loop();
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    cinder_os::test_panic_handler(info)
}

fn reset() {
    fs::store().reset();
}

#[test_case]
fn save_then_cat_round_trips() {
    reset();
    dispatch("save hello.txt Hello World");
    assert_eq!(fs::store().content("hello.txt"), Ok("Hello World"));
}

#[test_case]
fn save_collapses_argument_whitespace() {
    reset();
    dispatch("save spaced.txt one   two  three");
    assert_eq!(fs::store().content("spaced.txt"), Ok("one two three"));
}

#[test_case]
fn append_extends_existing_content() {
    reset();
    dispatch("save hello.txt Hello World");
    dispatch("append hello.txt !");
    assert_eq!(fs::store().content("hello.txt"), Ok("Hello World!"));
}

#[test_case]
fn cp_leaves_source_in_place() {
    reset();
    dispatch("save hello.txt Hello World");
    dispatch("cp hello.txt h2.txt");
    let store = fs::store();
    assert_eq!(store.content("hello.txt"), Ok("Hello World"));
    assert_eq!(store.content("h2.txt"), Ok("Hello World"));
    assert_eq!(store.file_count(), 2);
}

#[test_case]
fn mv_removes_source_after_copy() {
    reset();
    dispatch("save old.txt payload");
    dispatch("mv old.txt new.txt");
    let store = fs::store();
    assert!(!store.exists("old.txt"));
    assert_eq!(store.content("new.txt"), Ok("payload"));
    assert_eq!(store.file_count(), 1);
}

#[test_case]
fn rm_on_missing_file_changes_nothing() {
    reset();
    dispatch("save keep.txt data");
    dispatch("rm missing.txt");
    let store = fs::store();
    assert_eq!(store.file_count(), 1);
    assert!(store.exists("keep.txt"));
}

#[test_case]
fn touch_creates_empty_file_once() {
    reset();
    dispatch("touch empty.txt");
    {
        let store = fs::store();
        assert_eq!(store.content("empty.txt"), Ok(""));
        assert_eq!(store.size("empty.txt"), 0);
    }
    dispatch("save empty.txt data");
    dispatch("touch empty.txt");
    assert_eq!(fs::store().content("empty.txt"), Ok("data"));
}

#[test_case]
fn mkdir_writes_placeholder_marker() {
    reset();
    dispatch("mkdir projects");
    let store = fs::store();
    assert!(store.exists("projects.dir"));
}

#[test_case]
fn delete_is_an_alias_for_rm() {
    reset();
    dispatch("save a.txt x");
    dispatch("delete a.txt");
    assert!(!fs::store().exists("a.txt"));
}

#[test_case]
fn unknown_command_leaves_store_untouched() {
    reset();
    dispatch("save a.txt x");
    dispatch("frobnicate a.txt");
    let store = fs::store();
    assert_eq!(store.file_count(), 1);
    assert_eq!(store.content("a.txt"), Ok("x"));
}

#[test_case]
fn seeded_files_exist_after_init() {
    fs::init();
    let store = fs::store();
    assert!(store.exists("welcome.txt"));
    assert!(store.exists("readme.txt"));
    assert_eq!(store.file_count(), 2);
}
