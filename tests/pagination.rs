// tests/pagination.rs
//
// Drives the full scrape against a loopback server standing in for the
// guide, then inspects the deck file it writes.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use tae_kim_anki::{process, Error, Options};

const PREAMBLE: &str = "#separator:,\n#html:true\n\
                        #columns:japanese,english,vocab,section,chapter,link\n\
                        #deck:A Guide to Japanese Grammar by Tae Kim - Examples\n";

fn out_file(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("tae_kim_anki_{name}.csv"));
    let _ = fs::remove_file(&p);
    p
}

// List items are written on one line with explicit \n escapes: indentation
// inside <li> would end up in the flattened text.
fn page(chapter: &str, body: &str, next: Option<&str>) -> String {
    let nav = next
        .map(|href| format!("<a href=\"{href}\">Next →</a>"))
        .unwrap_or_default();
    format!(
        "<html><head><meta charset=\"utf-8\"></head><body><h1>{chapter}</h1>{body}\
         <div class=\"nav-next\">{nav}</div></body></html>"
    )
}

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    (listener, base)
}

fn serve(listener: TcpListener, pages: HashMap<String, String>) {
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            let pages = pages.clone();
            tokio::spawn(async move { respond(socket, &pages).await });
        }
    });
}

async fn respond(mut socket: TcpStream, pages: &HashMap<String, String>) {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let Ok(n) = socket.read(&mut chunk).await else {
            return;
        };
        if n == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..n]);
        if head.ends_with(b"\r\n\r\n") {
            break;
        }
    }

    let request = String::from_utf8_lossy(&head);
    let path = request.split_whitespace().nth(1).unwrap_or("/");
    let response = match pages.get(path) {
        Some(body) => format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ),
        None => {
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                .to_string()
        }
    };
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

#[tokio::test]
async fn three_page_chain_collects_every_page_in_order() {
    let (listener, base) = bind().await;
    let pages = HashMap::from([
        (
            "/stateofbeing/".to_string(),
            page(
                "State-of-Being",
                "<h2>Examples</h2><ol>\
                 <li>学生だ。\nI am a student.\n</li>\
                 <li>ただ</li></ol>",
                Some(&format!("{base}/particles/")),
            ),
        ),
        (
            "/particles/".to_string(),
            page(
                "Particles",
                "<h2>Vocabulary</h2><ol><li>人\nperson\n</li></ol>\
                 <h2>Examples</h2><ol><li>私は学生だ。\nAs for me, I am a student.\n</li></ol>",
                Some(&format!("{base}/adjectives/")),
            ),
        ),
        (
            "/adjectives/".to_string(),
            page(
                "Adjectives",
                "<h2>Examples</h2><ol><li>静かな人。\nQuiet person.\n</li></ol>",
                None,
            ),
        ),
    ]);
    serve(listener, pages);

    let options = Options {
        seed_url: format!("{base}/stateofbeing/"),
        output_path: out_file("three_page_chain"),
    };
    process::run(&options).await.unwrap();

    let deck = fs::read_to_string(&options.output_path).unwrap();
    let rows: Vec<&str> = deck
        .strip_prefix(PREAMBLE)
        .unwrap()
        .split("\r\n")
        .filter(|row| !row.is_empty())
        .collect();

    // The unsplittable item is skipped and the vocabulary list is filtered,
    // leaving one row per page, in page order.
    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("\"学生だ。\",\"I am a student.\""));
    assert!(rows[1].starts_with("\"私は学生だ。\""));
    assert!(rows[2].starts_with("\"静かな人。\""));
    // The vocabulary row would have started with these two quoted fields.
    assert!(!deck.contains("\"人\",\"person\""));

    assert!(rows[1].contains("\"Particles\""));
    assert!(rows[1].ends_with(&format!("\"{base}/particles/\"")));

    fs::remove_file(&options.output_path).ok();
}

#[tokio::test]
async fn reruns_write_byte_identical_decks() {
    let (listener, base) = bind().await;
    let pages = HashMap::from([(
        "/adverbs/".to_string(),
        page(
            "Adverbs",
            "<h2>Examples</h2><ol>\
             <li><span title=\"はや - fast\">速く</span>走った。\nRan quickly.\n</li></ol>",
            None,
        ),
    )]);
    serve(listener, pages);

    let options = Options {
        seed_url: format!("{base}/adverbs/"),
        output_path: out_file("reruns"),
    };
    // A longer leftover file must not survive the rewrite.
    fs::write(&options.output_path, "x".repeat(4096)).unwrap();

    process::run(&options).await.unwrap();
    let first = fs::read_to_string(&options.output_path).unwrap();
    process::run(&options).await.unwrap();
    let second = fs::read_to_string(&options.output_path).unwrap();

    let expected = format!(
        "{PREAMBLE}\"速く走った。\",\"Ran quickly.\",\"速く: はや - fast\",\
         \"Examples\",\"Adverbs\",\"{base}/adverbs/\"\r\n"
    );
    assert_eq!(first, expected);
    assert_eq!(first, second);

    fs::remove_file(&options.output_path).ok();
}

#[tokio::test]
async fn linking_back_to_a_visited_page_fails_fast() {
    let (listener, base) = bind().await;
    let pages = HashMap::from([
        (
            "/one/".to_string(),
            page(
                "One",
                "<ol><li>一\none\n</li></ol>",
                Some(&format!("{base}/two/")),
            ),
        ),
        (
            "/two/".to_string(),
            page(
                "Two",
                "<ol><li>二\ntwo\n</li></ol>",
                Some(&format!("{base}/one/")),
            ),
        ),
    ]);
    serve(listener, pages);

    let options = Options {
        seed_url: format!("{base}/one/"),
        output_path: out_file("cycle"),
    };
    let err = process::run(&options).await.unwrap_err();

    assert!(matches!(err, Error::PaginationCycle(url) if url == options.seed_url));
    assert!(!options.output_path.exists());
}

#[tokio::test]
async fn broken_later_page_fails_without_partial_output() {
    let (listener, base) = bind().await;
    let pages = HashMap::from([
        (
            "/one/".to_string(),
            page(
                "One",
                "<ol><li>一\none\n</li></ol>",
                Some(&format!("{base}/broken/")),
            ),
        ),
        (
            // No <h1>, so the page fails structural parsing.
            "/broken/".to_string(),
            "<html><body><ol><li>二\ntwo\n</li></ol>\
             <div class=\"nav-next\"></div></body></html>"
                .to_string(),
        ),
    ]);
    serve(listener, pages);

    let options = Options {
        seed_url: format!("{base}/one/"),
        output_path: out_file("broken_page"),
    };
    let err = process::run(&options).await.unwrap_err();

    assert!(matches!(
        err,
        Error::MissingStructure { ref url, what: "chapter heading" } if url.ends_with("/broken/")
    ));
    assert!(!options.output_path.exists());
}

#[tokio::test]
async fn fetch_failure_is_fatal() {
    let (listener, base) = bind().await;
    let pages = HashMap::from([(
        "/one/".to_string(),
        page(
            "One",
            "<ol><li>一\none\n</li></ol>",
            Some(&format!("{base}/missing/")),
        ),
    )]);
    serve(listener, pages);

    let options = Options {
        seed_url: format!("{base}/one/"),
        output_path: out_file("fetch_failure"),
    };
    let err = process::run(&options).await.unwrap_err();

    assert!(matches!(err, Error::Reqwest(_)));
    assert!(!options.output_path.exists());
}
