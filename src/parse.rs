//! Page parser: turns one fetched guide page into example records plus the
//! address of the next page. Everything here is a structural contract
//! against guidetojapanese.org's markup; the other modules never touch HTML.

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::MalformedExample;
use crate::record::{Example, Vocab};
use crate::{warn_time, Error, Result};

/// Tag attached to records coming from vocabulary lists. The export step
/// drops tagged records from the deck.
pub(crate) const VOCAB_LIST_TAG: &str = "vocab-only";

/// Separators tried in order when an item's text holds no line break:
/// en dash, then ideographic full stop. First one producing a two-way
/// split wins.
const FALLBACK_SEPARATORS: &[char] = &['–', '。'];

/// Class of the "next in series" navigation block at the bottom of a page.
const NEXT_NAV_SELECTOR: &str = "div.nav-next";

/// Everything extracted from one fetched page.
#[derive(Debug)]
pub(crate) struct Page {
    pub examples: Vec<Example>,
    pub next_url: Option<String>,
}

/// Parses a page: every ordered list is a candidate example/vocabulary
/// block, tagged with the chapter (the page's `<h1>`) and the section (the
/// nearest `<h2>` above the list). Returns the records in document order
/// and the next-page address, if the navigation block links one.
pub(crate) fn parse_page(html: &str, url: &str) -> Result<Page> {
    let doc = Html::parse_document(html);

    let h1 = create_selector("h1")?;
    let chapter: String = doc
        .select(&h1)
        .next()
        .ok_or_else(|| missing(url, "chapter heading"))?
        .text()
        .collect();

    let ol = create_selector("ol")?;
    let mut examples = Vec::new();
    for list in doc.select(&ol) {
        examples.extend(parse_list(list, &chapter, url)?);
    }

    let next_url = next_page_url(&doc, url)?;
    Ok(Page { examples, next_url })
}

/// Converts one ordered list into records, attaching provenance and the
/// vocabulary tag where the surrounding structure calls for it. Items that
/// fail to split are logged and skipped; the rest of the list still parses.
fn parse_list(list: ElementRef, chapter: &str, url: &str) -> Result<Vec<Example>> {
    let li = create_selector("li")?;
    let annotated = create_selector("[title]")?;

    let section = find_previous(*list, "h2")
        .map(|heading| heading.text().collect::<String>())
        .unwrap_or_default();
    let tag = is_vocab_list(list, &section).then(|| VOCAB_LIST_TAG.to_string());

    let mut examples = Vec::new();
    for item in list.select(&li) {
        match parse_item(item, &annotated) {
            Ok(mut example) => {
                example.section = section.clone();
                example.chapter = chapter.to_string();
                example.source_link = url.to_string();
                example.tag = tag.clone();
                examples.push(example);
            }
            Err(err) => warn_time!("{chapter}: skipping item, {err}"),
        }
    }
    Ok(examples)
}

/// Builds one example from a list item. The item's flattened text (title
/// attributes are not text and never leak in) must split into a
/// sentence/translation pair; every `title`-carrying element inside becomes
/// one vocabulary entry, in document order.
fn parse_item(
    item: ElementRef,
    annotated: &Selector,
) -> core::result::Result<Example, MalformedExample> {
    let text: String = item.text().collect();
    let (japanese, english) = split_pair(&text).ok_or_else(|| MalformedExample {
        html: item.html(),
    })?;

    let vocabulary = item
        .select(annotated)
        .map(|el| Vocab {
            term: el.text().collect(),
            gloss: el.value().attr("title").unwrap_or_default().to_string(),
        })
        .collect();

    Ok(Example {
        japanese,
        english,
        vocabulary,
        ..Example::default()
    })
}

/// Splits flattened item text into its two halves.
///
/// Strategy ladder: split on line breaks first; when that leaves a single
/// fragment, re-split it on each of [`FALLBACK_SEPARATORS`] in order. Every
/// strategy discards empty fragments and must end up with exactly two, so a
/// successful split never returns an empty half. Nothing is trimmed.
fn split_pair(text: &str) -> Option<(String, String)> {
    let fragments: Vec<&str> = text.split('\n').filter(|f| !f.is_empty()).collect();
    match fragments[..] {
        [japanese, english] => Some((japanese.to_string(), english.to_string())),
        [single] => FALLBACK_SEPARATORS
            .iter()
            .find_map(|&sep| split_on(single, sep)),
        _ => None,
    }
}

/// Two-way split on `sep`, or `None` when it does not produce exactly two
/// non-empty fragments.
fn split_on(text: &str, sep: char) -> Option<(String, String)> {
    let fragments: Vec<&str> = text.split(sep).filter(|f| !f.is_empty()).collect();
    match fragments[..] {
        [first, second] => Some((first.to_string(), second.to_string())),
        _ => None,
    }
}

/// A list is a vocabulary block when the element right before it, or the
/// section heading above it, says "vocabulary".
fn is_vocab_list(list: ElementRef, section: &str) -> bool {
    let label = previous_sibling_element(list)
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();
    contains_vocabulary(&label) || contains_vocabulary(section)
}

#[inline]
fn contains_vocabulary(text: &str) -> bool {
    text.to_lowercase().contains("vocabulary")
}

/// Address of the next page in the series. The navigation block must exist
/// on every page; a block without a link means the chain is complete.
fn next_page_url(doc: &Html, url: &str) -> Result<Option<String>> {
    let nav = create_selector(NEXT_NAV_SELECTOR)?;
    let anchor = create_selector("a")?;

    let block = doc
        .select(&nav)
        .next()
        .ok_or_else(|| missing(url, "next-page navigation block"))?;
    match block.select(&anchor).next() {
        Some(link) => {
            let href = link
                .value()
                .attr("href")
                .ok_or_else(|| missing(url, "href on the next-page link"))?;
            Ok(Some(href.to_string()))
        }
        None => Ok(None),
    }
}

/// Nearest element named `tag` that precedes `start` in document order:
/// walks to the previous sibling's last descendant, or up to the parent,
/// until an element matches.
fn find_previous<'a>(start: NodeRef<'a, Node>, tag: &str) -> Option<ElementRef<'a>> {
    let mut node = start;
    loop {
        node = match node.prev_sibling() {
            Some(prev) => last_descendant(prev),
            None => node.parent()?,
        };
        if let Some(el) = ElementRef::wrap(node) {
            if el.value().name() == tag {
                return Some(el);
            }
        }
    }
}

fn last_descendant(node: NodeRef<Node>) -> NodeRef<Node> {
    let mut node = node;
    while let Some(last) = node.last_child() {
        node = last;
    }
    node
}

/// Closest preceding sibling that is an element, skipping text nodes.
fn previous_sibling_element<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.prev_siblings().find_map(ElementRef::wrap)
}

#[inline]
fn create_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| Error::Selector(selector.to_string()))
}

#[inline]
fn missing(url: &str, what: &'static str) -> Error {
    Error::MissingStructure {
        url: url.to_string(),
        what,
    }
}

// ── Tests ──
