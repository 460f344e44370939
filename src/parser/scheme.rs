//! Scheme detection and per-scheme grammar tables
//!
//! A document declares exactly one object. Its first meaningful keyword picks
//! the scheme; anything unrecognised falls back to [`Scheme::Function`] so
//! broken files still get partial analysis.

use serde::{Deserialize, Serialize};

use super::lexer::Token;

/// The top-level object kind a document declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    #[default]
    Function,
    /// API endpoint (`query` keyword).
    Api,
    /// Database table (`table` keyword).
    Db,
    Task,
    ApiGroup,
    TableTrigger,
}

/// Keyword → scheme table.
const KEYWORDS: &[(&str, Scheme)] = &[
    ("function", Scheme::Function),
    ("query", Scheme::Api),
    ("table", Scheme::Db),
    ("task", Scheme::Task),
    ("api_group", Scheme::ApiGroup),
    ("table_trigger", Scheme::TableTrigger),
];

impl Scheme {
    pub const ALL: [Scheme; 6] = [
        Scheme::Function,
        Scheme::Api,
        Scheme::Db,
        Scheme::Task,
        Scheme::ApiGroup,
        Scheme::TableTrigger,
    ];

    /// The scheme's tag (`function`, `api`, `db`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Function => "function",
            Scheme::Api => "api",
            Scheme::Db => "db",
            Scheme::Task => "task",
            Scheme::ApiGroup => "api_group",
            Scheme::TableTrigger => "table_trigger",
        }
    }

    /// The keyword that opens a document of this scheme.
    pub fn keyword(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(_, scheme)| *scheme == self)
            .map(|(kw, _)| *kw)
            .unwrap_or("function")
    }

    /// Map an object keyword to its scheme.
    pub fn from_keyword(keyword: &str) -> Option<Scheme> {
        KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == keyword)
            .map(|(_, scheme)| *scheme)
    }

    /// Parse an explicit scheme override. Accepts scheme tags, object
    /// keywords, and the `endpoint` alias, case-insensitively.
    pub fn from_name(name: &str) -> Option<Scheme> {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "endpoint" => Some(Scheme::Api),
            other => Scheme::ALL
                .into_iter()
                .find(|s| s.as_str() == other)
                .or_else(|| Scheme::from_keyword(other)),
        }
    }

    /// The section vocabulary for this scheme.
    pub fn grammar(self) -> &'static SchemeGrammar {
        match self {
            Scheme::Function => &FUNCTION_GRAMMAR,
            Scheme::Api => &API_GRAMMAR,
            Scheme::Db => &DB_GRAMMAR,
            Scheme::Task => &TASK_GRAMMAR,
            Scheme::ApiGroup => &API_GROUP_GRAMMAR,
            Scheme::TableTrigger => &TABLE_TRIGGER_GRAMMAR,
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sections an object body of a given scheme may contain.
#[derive(Debug)]
pub struct SchemeGrammar {
    /// Block whose lines are typed declarations (`input`, or `schema` for tables).
    pub declaration_block: Option<&'static str>,
    pub sections: &'static [&'static str],
}

impl SchemeGrammar {
    pub fn knows_section(&self, name: &str) -> bool {
        self.sections.contains(&name)
    }

    /// Whether this scheme has a `stack` of executable statements.
    pub fn has_stack(&self) -> bool {
        self.knows_section("stack")
    }
}

static FUNCTION_GRAMMAR: SchemeGrammar = SchemeGrammar {
    declaration_block: Some("input"),
    sections: &[
        "input",
        "stack",
        "response",
        "test",
        "history",
        "cache",
        "tags",
        "description",
    ],
};

static API_GRAMMAR: SchemeGrammar = SchemeGrammar {
    declaration_block: Some("input"),
    sections: &[
        "input",
        "stack",
        "response",
        "auth",
        "middleware",
        "history",
        "cache",
        "tags",
        "description",
    ],
};

static DB_GRAMMAR: SchemeGrammar = SchemeGrammar {
    declaration_block: Some("schema"),
    sections: &[
        "schema",
        "index",
        "auth",
        "view",
        "security",
        "tags",
        "description",
    ],
};

static TASK_GRAMMAR: SchemeGrammar = SchemeGrammar {
    declaration_block: None,
    sections: &[
        "stack",
        "schedule",
        "active",
        "history",
        "tags",
        "description",
    ],
};

static API_GROUP_GRAMMAR: SchemeGrammar = SchemeGrammar {
    declaration_block: None,
    sections: &["canonical", "swagger", "history", "tags", "description"],
};

static TABLE_TRIGGER_GRAMMAR: SchemeGrammar = SchemeGrammar {
    declaration_block: Some("input"),
    sections: &[
        "input",
        "stack",
        "table",
        "actions",
        "datasource",
        "history",
        "tags",
        "description",
    ],
};

/// Result of scanning for the object keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedScheme {
    pub scheme: Scheme,
    /// Index of the keyword token, when one was recognised.
    pub keyword_index: Option<usize>,
}

/// Classify a token stream by its first non-comment token.
pub fn detect_scheme(tokens: &[Token]) -> DetectedScheme {
    let first = tokens.iter().enumerate().find(|(_, t)| !t.kind.is_trivia());
    match first {
        Some((index, token)) => match Scheme::from_keyword(&token.text) {
            Some(scheme) if token.kind == super::TokenKind::Ident => DetectedScheme {
                scheme,
                keyword_index: Some(index),
            },
            _ => DetectedScheme {
                scheme: Scheme::Function,
                keyword_index: None,
            },
        },
        None => DetectedScheme {
            scheme: Scheme::Function,
            keyword_index: None,
        },
    }
}
