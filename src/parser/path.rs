//! Document-path and identifier resolution.
//!
//! Document mode parses member chains like `foo.bar[0].*`, `$.a**.b` and
//! backtick-quoted segments directly. Table mode resolves up to three
//! dot-separated segments right-to-left into column, table and schema names,
//! and only attaches a document path through the `->` / `->>` JSON-extraction
//! syntax (`col->'$.field[*]'`). Both arrow forms produce the same AST.

use crate::ast::{DocumentPathItem, Expr, Identifier};
use crate::error::ExprResult;
use crate::lexer::{Lexer, Token};
use crate::parser::{ParseMode, Parser};

impl Parser {
    /// Parse an identifier in the grammar of the active mode
    pub(crate) fn parse_identifier_expression(&mut self) -> ExprResult<Expr> {
        match self.mode {
            ParseMode::Document => self.parse_document_field(),
            ParseMode::Table => self.parse_column_identifier(),
        }
    }

    /// Parse a document field: `$`, `$.path`, or a bare member chain
    pub(crate) fn parse_document_field(&mut self) -> ExprResult<Expr> {
        let mut items = Vec::new();

        if matches!(self.current_token(), Token::Dollar) {
            self.advance();
            self.parse_document_path_items(&mut items)?;
        } else if self.scoped {
            return Err(self.error_expecting("a document path rooted at '$'"));
        } else {
            let first = self.identifier_segment()?;
            items.push(DocumentPathItem::Member(first));
            self.parse_document_path_items(&mut items)?;
        }

        Ok(Expr::Identifier(Identifier {
            document_path: items,
            ..Default::default()
        }))
    }

    /// Read one plain or backtick-quoted identifier segment
    fn identifier_segment(&mut self) -> ExprResult<String> {
        match self.current_token() {
            Token::Identifier(name) | Token::QuotedIdentifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error_expecting("an identifier")),
        }
    }

    /// Parse trailing document path segments: `.member`, `.*`, `[N]`, `[*]`,
    /// `**`. A `**` segment must be followed by a member or array index.
    pub(crate) fn parse_document_path_items(
        &mut self,
        items: &mut Vec<DocumentPathItem>,
    ) -> ExprResult<()> {
        loop {
            match self.current_token() {
                Token::Dot => {
                    self.advance();
                    match self.current_token() {
                        Token::Star => {
                            self.advance();
                            items.push(DocumentPathItem::MemberAsterisk);
                        }
                        Token::Identifier(name) | Token::QuotedIdentifier(name) => {
                            let name = name.clone();
                            self.advance();
                            items.push(DocumentPathItem::Member(name));
                        }
                        _ => return Err(self.error_expecting("a member name or '*' after '.'")),
                    }
                }
                Token::LeftBracket => {
                    self.advance();
                    match self.current_token() {
                        Token::Star => {
                            self.advance();
                            items.push(DocumentPathItem::ArrayIndexAsterisk);
                        }
                        Token::Integer(raw) => {
                            let index = raw
                                .parse::<u32>()
                                .map_err(|_| self.error_expecting("an array index"))?;
                            self.advance();
                            items.push(DocumentPathItem::ArrayIndex(index));
                        }
                        _ => return Err(self.error_expecting("an array index or '*'")),
                    }
                    self.expect(Token::RightBracket)?;
                }
                Token::DoubleStar => {
                    self.advance();
                    items.push(DocumentPathItem::DoubleAsterisk);
                    // `**` cannot terminate a path
                    if !matches!(self.current_token(), Token::Dot | Token::LeftBracket) {
                        return Err(
                            self.error_expecting("a member or array index segment after '**'")
                        );
                    }
                }
                _ => break,
            }
        }

        Ok(())
    }

    /// Parse a table-mode column identifier: up to three dot-separated
    /// segments resolved right-to-left, plus optional JSON extraction
    pub(crate) fn parse_column_identifier(&mut self) -> ExprResult<Expr> {
        let mut parts = vec![self.identifier_segment()?];
        while parts.len() < 3 && matches!(self.current_token(), Token::Dot) {
            self.advance();
            parts.push(self.identifier_segment()?);
        }

        let mut ident = Identifier {
            name: parts.pop(),
            table_name: parts.pop(),
            schema_name: parts.pop(),
            document_path: Vec::new(),
        };

        if matches!(self.current_token(), Token::Arrow | Token::TwoHeadArrow) {
            self.advance();
            let raw = match self.current_token() {
                Token::Str(path) => {
                    let path = path.clone();
                    self.advance();
                    path
                }
                _ => return Err(self.error_expecting("a quoted document path after '->'")),
            };
            ident.document_path = self.parse_document_path_string(&raw)?;
        }

        Ok(Expr::Identifier(ident))
    }

    /// Parse the contents of a quoted `'$...'` extraction path
    fn parse_document_path_string(&self, raw: &str) -> ExprResult<Vec<DocumentPathItem>> {
        let tokens = Lexer::new(raw).tokenize()?;
        let mut sub = Parser::from_tokens(tokens, ParseMode::Document, true);

        if !matches!(sub.current_token(), Token::Dollar) {
            return Err(sub.error_expecting("a document path starting with '$'"));
        }
        sub.advance();

        let mut items = Vec::new();
        sub.parse_document_path_items(&mut items)?;

        if !matches!(sub.current_token(), Token::Eof) {
            return Err(sub.error_expecting("end of document path"));
        }

        Ok(items)
    }
}
