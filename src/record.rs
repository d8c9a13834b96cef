/// One vocabulary entry pulled from an inline annotation: the annotated
/// text and its title-attribute explanation, both verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocab {
    pub term: String,
    pub gloss: String,
}

/// One example sentence parsed out of a list item.
///
/// `japanese` and `english` are the two halves of the sentence/translation
/// pair and are never empty. `section`, `chapter` and `source_link` record
/// where on the guide the item was found; `tag` classifies records that the
/// export step filters out (vocabulary-only lists).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Example {
    pub japanese: String,
    pub english: String,
    pub vocabulary: Vec<Vocab>,
    pub section: String,
    pub chapter: String,
    pub source_link: String,
    pub tag: Option<String>,
}
