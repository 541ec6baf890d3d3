use core::fmt;

/// An attribute on a start or end tag token.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// "each of which has a name", already lowercased by the tokenizer
    pub name: String,
    /// "and a value", with character references decoded
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Payload shared by start and end tag tokens.
///
/// "Start and end tag tokens have a tag name, a self-closing flag, and a
/// list of attributes, each of which has a name and a value. When a start
/// or end tag token is created, its self-closing flag must be unset (its
/// other state is that it be set), and its attributes list must be empty."
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// "a tag name", lowercased
    pub name: String,
    /// "a self-closing flag"
    pub self_closing: bool,
    /// "a list of attributes", in source order with duplicates removed
    pub attributes: Vec<Attribute>,
}

impl Tag {
    /// Create a tag with the given name and no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper, mostly useful in tests and synthesized tokens.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Look an attribute up by exact (lowercase) name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

/// "DOCTYPE tokens have a name, a public identifier, a system identifier,
/// and a force-quirks flag. When a DOCTYPE token is created, its name,
/// public identifier, and system identifier must be marked as missing
/// (which is a distinct state from the empty string), and the force-quirks
/// flag must be set to off (its other state is on)."
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doctype {
    /// "a name"
    pub name: Option<String>,
    /// "a public identifier"
    pub public_identifier: Option<String>,
    /// "a system identifier"
    pub system_identifier: Option<String>,
    /// "a force-quirks flag"
    pub force_quirks: bool,
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "The output of the tokenization step is a series of zero or more of the following
/// tokens: DOCTYPE, start tag, end tag, comment, character, end-of-file."
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A `<!DOCTYPE>` declaration.
    Doctype(Doctype),
    /// `<name ...>`
    StartTag(Tag),
    /// `</name>`; attributes on end tags are a parse error but are kept.
    EndTag(Tag),
    /// "Comment and character tokens have data."
    Comment(String),
    /// One code point of text.
    Character(char),
    /// Always the last token of a stream.
    EndOfFile,
}

impl Token {
    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// Tag name for start and end tags.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag(tag) | Self::EndTag(tag) => Some(&tag.name),
            _ => None,
        }
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    /// "A character token that is one of U+0009 CHARACTER TABULATION,
    /// U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE RETURN (CR),
    /// or U+0020 SPACE"
    #[must_use]
    pub const fn is_whitespace_character(&self) -> bool {
        matches!(
            self,
            Self::Character('\t' | '\n' | '\x0C' | '\r' | ' ')
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype(doctype) => {
                write!(f, "DOCTYPE")?;
                if let Some(name) = &doctype.name {
                    write!(f, " {name}")?;
                }
                if let Some(public_id) = &doctype.public_identifier {
                    write!(f, " PUBLIC \"{public_id}\"")?;
                }
                if let Some(system_id) = &doctype.system_identifier {
                    write!(f, " SYSTEM \"{system_id}\"")?;
                }
                if doctype.force_quirks {
                    write!(f, " (force-quirks)")?;
                }
                Ok(())
            }
            Self::StartTag(tag) => {
                write!(f, "<{}", tag.name)?;
                for attr in &tag.attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if tag.self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag(tag) => write!(f, "</{}>", tag.name),
            Self::Comment(data) => write!(f, "<!--{data}-->"),
            Self::Character(c) => match c {
                '\n' => write!(f, "Character(\\n)"),
                '\t' => write!(f, "Character(\\t)"),
                ' ' => write!(f, "Character(SPACE)"),
                c => write!(f, "Character({c})"),
            },
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}
