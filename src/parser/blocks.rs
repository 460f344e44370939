//! Brace-depth scanning over the flat token array
//!
//! Nesting is never stored on tokens. Every consumer that needs a block's
//! extent calls [`block_end`], which runs its own depth counter from the
//! opening brace. String literals are single opaque tokens, so braces inside
//! quotes never affect depth.

use super::lexer::Token;
use super::token_kind::TokenKind;

/// Index of the first non-comment token at or after `from`, below `limit`.
pub fn next_significant(tokens: &[Token], from: usize, limit: usize) -> Option<usize> {
    (from..limit.min(tokens.len())).find(|&i| !tokens[i].kind.is_trivia())
}

/// Index of the last non-comment token strictly before `before`.
pub fn prev_significant(tokens: &[Token], before: usize) -> Option<usize> {
    (0..before.min(tokens.len()))
        .rev()
        .find(|&i| !tokens[i].kind.is_trivia())
}

/// Index of the `}` closing the `{` at `open`, or `None` when the input ends
/// first (the block then runs to the end of input).
pub fn block_end(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// A brace that has no partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceIssue {
    /// `{` at this token index is never closed.
    Unterminated(usize),
    /// `}` at this token index closes nothing.
    Unmatched(usize),
}

/// Find every unpartnered brace in one pass.
pub fn check_braces(tokens: &[Token]) -> Vec<BraceIssue> {
    let mut open = Vec::new();
    let mut issues = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LBrace => open.push(i),
            TokenKind::RBrace => {
                if open.pop().is_none() {
                    issues.push(BraceIssue::Unmatched(i));
                }
            }
            _ => {}
        }
    }
    issues.extend(open.into_iter().map(BraceIssue::Unterminated));
    issues.sort_by_key(|issue| match issue {
        BraceIssue::Unterminated(i) | BraceIssue::Unmatched(i) => *i,
    });
    issues
}

/// One statement of a block body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// First significant token.
    pub start: usize,
    /// One past the last token.
    pub end: usize,
    /// Comment tokens between the previous statement and this one.
    pub leading_comments: Vec<usize>,
}

impl Statement {
    /// Token indices of the statement, comments excluded.
    pub fn significant<'t>(&self, tokens: &'t [Token]) -> impl Iterator<Item = usize> + 't {
        let (start, end) = (self.start, self.end.min(tokens.len()));
        (start..end).filter(move |&i| !tokens[i].kind.is_trivia())
    }
}

/// Split the tokens in `start..end` into statements.
///
/// A statement runs to the end of its line. A `{` opened on the line extends
/// it to the matching `}` (and whatever follows on that line, e.g.
/// `} as $result`); open brackets and parentheses extend it the same way.
/// `;` ends a statement early.
pub fn statements(tokens: &[Token], start: usize, end: usize) -> Vec<Statement> {
    let end = end.min(tokens.len());
    let mut out = Vec::new();
    let mut comments = Vec::new();
    let mut i = start;

    while i < end {
        if tokens[i].kind.is_trivia() {
            comments.push(i);
            i += 1;
            continue;
        }
        if tokens[i].kind == TokenKind::Semicolon {
            i += 1;
            continue;
        }

        let stmt_start = i;
        let mut last_line = tokens[i].line;
        let mut nesting = 0usize;
        let mut j = i;
        while j < end {
            let token = &tokens[j];
            if j > stmt_start && nesting == 0 && token.line > last_line {
                break;
            }
            match token.kind {
                TokenKind::LBrace => match block_end(tokens, j) {
                    Some(close) if close < end => {
                        last_line = tokens[close].line;
                        j = close + 1;
                        continue;
                    }
                    _ => {
                        j = end;
                        break;
                    }
                },
                TokenKind::LBracket | TokenKind::LParen => nesting += 1,
                TokenKind::RBracket | TokenKind::RParen => nesting = nesting.saturating_sub(1),
                TokenKind::Semicolon if nesting == 0 => {
                    j += 1;
                    break;
                }
                TokenKind::RBrace if j > stmt_start => break,
                _ => {}
            }
            last_line = token.line;
            j += 1;
        }

        out.push(Statement {
            start: stmt_start,
            end: j,
            leading_comments: std::mem::take(&mut comments),
        });
        i = j;
    }
    out
}
