//! End-to-end load of a small book tree into an on-disk SQLite database.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use abc_tune_loader::{
    discover_tune_files, extract_file, open_store, LoaderConfig, TuneLibrary, TuneRecord,
    TuneStore,
};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn build_corpus(root: &Path) {
    write(
        root,
        "abc_books/3/reel.abc",
        "X:1\nT:The Lark\nM:4/4\nK:G\nabc-body-line-1\nX:2\nT:Second Tune\nabc-body-line-2\n",
    );
    write(
        root,
        "abc_books/7/jigs.abc",
        "% book seven\nX:10a\nT:Cliffs of Moher\nR:jig\nM:6/8\nK:Ador\n|:aga bag|eaf ged:|\n\n",
    );
    write(root, "abc_books/7/notes.txt", "X:99\nT:Not a tune file\n");
    write(root, "abc_books/7/empty.abc", "no tunes in here\n");
    write(root, "abc_books/notabook/b.abc", "X:1\nT:Ignored\n");
    write(root, "abc_books/7/sub/c.abc", "X:1\nT:Also ignored\n");
}

fn contents(rows: impl IntoIterator<Item = TuneRecord>) -> HashSet<TuneRecord> {
    rows.into_iter().collect()
}

#[test]
fn load_round_trips_through_sqlite() {
    let temp = TempDir::new().unwrap();
    build_corpus(temp.path());
    let config = LoaderConfig::new(temp.path().join("abc_books"));

    let store = open_store(&temp.path().join("data").join("tunes.sqlite")).unwrap();
    let mut library = TuneLibrary::new(store);
    let report = library.reload(&config).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.files_scanned, 3);
    assert_eq!(report.tunes_loaded, 3);

    let expected = contents(
        discover_tune_files(&config.root, &config.extension)
            .unwrap()
            .iter()
            .flat_map(|file| extract_file(file).unwrap()),
    );
    let snapshot = library.snapshot().unwrap();
    assert_eq!(contents(snapshot.into_iter().map(|t| t.record)), expected);

    let lark = expected.iter().find(|t| t.title == "The Lark").unwrap();
    assert_eq!(lark.book_number, 3);
    assert_eq!(lark.file_name, "reel.abc");
    assert_eq!(lark.meter, "4/4");
    assert_eq!(lark.abc_text, "abc-body-line-1");

    let cliffs = expected.iter().find(|t| t.ref_number == "10a").unwrap();
    assert_eq!(cliffs.book_number, 7);
    assert_eq!(cliffs.tune_type, "jig");
    assert_eq!(cliffs.abc_text, "|:aga bag|eaf ged:|\n");
}

#[test]
fn reloading_unchanged_corpus_is_idempotent() {
    let temp = TempDir::new().unwrap();
    build_corpus(temp.path());
    let config = LoaderConfig::new(temp.path().join("abc_books"));
    let db_path = temp.path().join("tunes.sqlite");

    let mut library = TuneLibrary::new(open_store(&db_path).unwrap());
    let first = library.reload(&config).unwrap();
    let first_rows = library.snapshot().unwrap();

    let second = library.reload(&config).unwrap();
    let second_rows = library.snapshot().unwrap();

    assert_eq!(first.tunes_loaded, second.tunes_loaded);
    assert_eq!(first_rows.len(), second_rows.len());
    assert_eq!(
        contents(first_rows.iter().map(|t| t.record.clone())),
        contents(second_rows.iter().map(|t| t.record.clone()))
    );

    let old_ids: HashSet<_> = first_rows.iter().map(|t| t.id).collect();
    assert!(second_rows.iter().all(|t| !old_ids.contains(&t.id)));
}

#[test]
fn reopened_database_keeps_last_load() {
    let temp = TempDir::new().unwrap();
    build_corpus(temp.path());
    let config = LoaderConfig::new(temp.path().join("abc_books"));
    let db_path = temp.path().join("tunes.sqlite");

    {
        let mut library = TuneLibrary::new(open_store(&db_path).unwrap());
        library.reload(&config).unwrap();
    }

    let store = open_store(&db_path).unwrap();
    assert_eq!(store.scan_all().unwrap().len(), 3);
}

#[test]
fn missing_root_keeps_previous_snapshot() {
    let temp = TempDir::new().unwrap();
    build_corpus(temp.path());
    let db_path = temp.path().join("tunes.sqlite");

    let mut library = TuneLibrary::new(open_store(&db_path).unwrap());
    library
        .reload(&LoaderConfig::new(temp.path().join("abc_books")))
        .unwrap();

    assert!(library
        .reload(&LoaderConfig::new(temp.path().join("missing")))
        .is_err());
    assert_eq!(library.snapshot().unwrap().len(), 3);
}
