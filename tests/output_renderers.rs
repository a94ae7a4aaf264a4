use chrono::{DateTime, TimeZone, Utc};
use remls::cli::ListOptions;
use remls::output::{csv, terminal};
use remls::{Entry, Listing, Lister, MemoryClient};

fn modified() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2018, 6, 1, 9, 30, 0).unwrap()
}

fn lister(client: MemoryClient, recursive: bool, human_readable: bool) -> Lister<MemoryClient> {
    Lister::new(
        ListOptions {
            recursive,
            human_readable,
            ..ListOptions::default()
        },
        client,
    )
}

#[test]
fn test_single_file_at_root() {
    let client = MemoryClient::new(10).with_file("/a.txt", 10, modified());
    let listing = lister(client, false, false).get_listing("").unwrap();

    assert_eq!(
        terminal::render(&listing, false, false),
        vec!["total 10", "[f]\t10\t2018-06-01 09:30:00 +0000 UTC\t/a.txt"]
    );
    assert_eq!(terminal::render(&listing, false, true)[0], "total 10B");
}

#[test]
fn test_empty_folder_renders_empty_block() {
    let client = MemoryClient::new(10).with_folder("/sub");
    let listing = lister(client, true, false).get_listing("").unwrap();

    assert_eq!(
        terminal::render(&listing, true, false),
        vec!["/:", "total 0", "[d]\t/sub", "/sub:", "total 0"]
    );
}

#[test]
fn test_two_pages_sorted_by_name() {
    // The second page holds the alphabetically first file
    let client = MemoryClient::new(1)
        .with_file("/b.txt", 2, modified())
        .with_file("/a.txt", 1, modified());
    let listing = lister(client, false, false).get_listing("").unwrap();

    let lines = terminal::render(&listing, false, false);
    assert_eq!(lines[0], "total 3");
    assert!(lines[1].ends_with("/a.txt"));
    assert!(lines[2].ends_with("/b.txt"));
}

#[test]
fn test_total_counts_only_files() {
    let mut listing = Listing::new();
    listing.insert(
        "/photos".to_string(),
        vec![
            Entry::folder("2019", "/photos/2019"),
            Entry::file("x.jpg", "/photos/x.jpg", 700, modified()),
            Entry::Absent,
            Entry::file("y.jpg", "/photos/y.jpg", 300, modified()),
        ],
    );

    let lines = terminal::render(&listing, true, false);
    assert_eq!(lines[0], "/photos:");
    assert_eq!(lines[1], "total 1000");
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_directories_in_path_order() {
    let mut listing = Listing::new();
    for key in ["/b", "/", "/a/z", "/a"] {
        listing.insert(key.to_string(), vec![Entry::Absent]);
    }

    let headers: Vec<String> = terminal::render(&listing, true, false)
        .into_iter()
        .filter(|l| l.ends_with(':'))
        .collect();
    assert_eq!(headers, vec!["/:", "/a:", "/a/z:", "/b:"]);
}

#[test]
fn test_csv_skips_placeholders() {
    let client = MemoryClient::new(10)
        .with_folder("/sub")
        .with_file("/sub/doc.pdf", 2_000_000, modified());
    let listing = lister(client, true, true).get_listing("").unwrap();

    let mut buf = Vec::new();
    csv::render(&listing, true, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert_eq!(text.lines().count(), 3);
    let row = text.lines().find(|l| l.contains("doc.pdf")).unwrap();
    assert!(row.starts_with("/sub,file,doc.pdf,/sub/doc.pdf,2000000,"));
    assert!(row.contains("MB,"));
}
