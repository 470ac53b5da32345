//! Recursive-descent query parser
//!
//! ```text
//! query          := 'select' projectionList 'from' source [where] [orderBy] [limit]
//! projectionList := expression (',' expression)*
//! expression     := name '(' [expression (',' expression)*] ')' | attribute | literal
//! where          := 'where' expression
//! orderBy        := 'order' 'by' position ['asc'|'desc'] (',' position ['asc'|'desc'])*
//! limit          := 'limit' integer
//! ```
//!
//! Keywords are matched case-insensitively. The parser consults the query
//! context to tell function calls, attribute references and literals apart.

use super::ast::{Expression, OrderKey, SelectQuery, SortDirection};
use super::errors::{ParserError, ParserResult};
use super::source::Source;
use super::tokenizer::{tokenize, Token, TokenKind};
use crate::context::QueryContext;
use crate::functions::TAG_WHERE;

const KEYWORD_SELECT: &str = "select";
const KEYWORD_FROM: &str = "from";
const KEYWORD_WHERE: &str = "where";
const KEYWORD_ORDER: &str = "order";
const KEYWORD_BY: &str = "by";
const KEYWORD_ASC: &str = "asc";
const KEYWORD_DESC: &str = "desc";
const KEYWORD_LIMIT: &str = "limit";

/// Left-to-right view over a token slice with one-token lookahead
struct Cursor<'t> {
    tokens: &'t [Token],
    index: usize,
}

impl<'t> Cursor<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, index: 0 }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.index)
    }

    fn next(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.index);
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        self.peek().map_or(false, |token| token.is_keyword(keyword))
    }

    /// Consumes the next token if it is `keyword`
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_keyword(keyword) {
            self.index += 1;
            true
        } else {
            false
        }
    }
}

/// Parser bound to a query context
pub struct Parser<'a> {
    context: &'a QueryContext,
}

impl<'a> Parser<'a> {
    pub fn new(context: &'a QueryContext) -> Self {
        Self { context }
    }

    /// Tokenizes and parses a query string
    pub fn parse_str(&self, query: &str) -> ParserResult<SelectQuery> {
        self.parse(&tokenize(query))
    }

    /// Parses a token stream into a select query
    pub fn parse(&self, tokens: &[Token]) -> ParserResult<SelectQuery> {
        let mut cursor = Cursor::new(tokens);

        if !cursor.eat_keyword(KEYWORD_SELECT) {
            return Err(ParserError::syntax(
                "expected select keyword at the start of the query",
            ));
        }

        let projections = self.parse_projections(&mut cursor)?;

        if !cursor.eat_keyword(KEYWORD_FROM) {
            return Err(match cursor.peek() {
                Some(token) => ParserError::syntax(format!(
                    "expected from keyword after projections, found {}",
                    token.lexeme
                )),
                None => ParserError::syntax("expected from keyword after projections"),
            });
        }

        let source = self.parse_source(&mut cursor)?;
        let mut query = SelectQuery::new(source, projections);

        if cursor.eat_keyword(KEYWORD_WHERE) {
            query.filter = Some(self.parse_where(&mut cursor)?);
        }
        if cursor.eat_keyword(KEYWORD_ORDER) {
            query.order_keys = self.parse_order_by(&mut cursor, query.projections.len())?;
        }
        if cursor.eat_keyword(KEYWORD_LIMIT) {
            query.limit = Some(self.parse_limit(&mut cursor)?);
        }

        if let Some(token) = cursor.peek() {
            return Err(ParserError::syntax(format!(
                "unexpected {} at the end of the query",
                token.lexeme
            )));
        }

        Ok(query)
    }

    fn parse_projections(&self, cursor: &mut Cursor<'_>) -> ParserResult<Vec<Expression>> {
        let mut projections = Vec::new();
        loop {
            match cursor.peek() {
                None => {
                    return Err(ParserError::syntax(
                        "expected at least one projection after select",
                    ))
                }
                Some(token) if token.is_keyword(KEYWORD_FROM) => {
                    return Err(ParserError::syntax(if projections.is_empty() {
                        "expected at least one projection after select".to_string()
                    } else {
                        "expected a projection after ,".to_string()
                    }))
                }
                Some(_) => {}
            }

            projections.push(self.parse_expression(cursor, false)?);

            if cursor.peek_kind() == Some(TokenKind::Comma) {
                cursor.next();
            } else {
                return Ok(projections);
            }
        }
    }

    fn parse_expression(
        &self,
        cursor: &mut Cursor<'_>,
        inside_aggregate: bool,
    ) -> ParserResult<Expression> {
        let token = cursor.next().ok_or_else(|| {
            ParserError::syntax("unexpected end of query, expected an expression")
        })?;
        if token.kind != TokenKind::RawText {
            return Err(ParserError::syntax(format!(
                "unexpected {}, expected an expression",
                token.lexeme
            )));
        }

        if cursor.peek_kind() == Some(TokenKind::OpeningParenthesis) {
            cursor.next();
            return self.parse_call(cursor, token, inside_aggregate);
        }

        Ok(match self.context.attributes().resolve(&token.lexeme) {
            Some(canonical) => Expression::attribute(canonical),
            None => Expression::literal(token.lexeme.clone()),
        })
    }

    /// Parses the arguments of a call whose `(` has been consumed
    fn parse_call(
        &self,
        cursor: &mut Cursor<'_>,
        name_token: &Token,
        inside_aggregate: bool,
    ) -> ParserResult<Expression> {
        let spec = self
            .context
            .functions()
            .lookup(&name_token.lexeme)
            .map_err(|_| ParserError::unknown_function(&name_token.lexeme))?;
        let name = spec.name().to_string();
        let is_aggregate = spec.is_aggregate();

        if is_aggregate && inside_aggregate {
            return Err(ParserError::syntax(format!(
                "aggregate function {} cannot be nested inside another aggregate function",
                name
            )));
        }

        let mut args = Vec::new();
        if cursor.peek_kind() == Some(TokenKind::ClosingParenthesis) {
            cursor.next();
            return Ok(Expression::call(name, args));
        }

        loop {
            args.push(self.parse_expression(cursor, inside_aggregate || is_aggregate)?);
            match cursor.next() {
                Some(token) if token.kind == TokenKind::Comma => continue,
                Some(token) if token.kind == TokenKind::ClosingParenthesis => break,
                Some(token) => {
                    return Err(ParserError::syntax(format!(
                        "expected , or ) in the arguments of function {}, found {}",
                        name, token.lexeme
                    )))
                }
                None => {
                    return Err(ParserError::syntax(format!(
                        "missing closing parenthesis for function {}",
                        name
                    )))
                }
            }
        }

        Ok(Expression::call(name, args))
    }

    fn parse_source(&self, cursor: &mut Cursor<'_>) -> ParserResult<Source> {
        let token = match cursor.next() {
            Some(token) if token.kind == TokenKind::RawText => token,
            _ => return Err(ParserError::syntax("expected a source directory after from")),
        };
        let source = Source::resolve(&token.lexeme)?;

        match cursor.peek() {
            None => Ok(source),
            Some(next)
                if next.is_keyword(KEYWORD_WHERE)
                    || next.is_keyword(KEYWORD_ORDER)
                    || next.is_keyword(KEYWORD_LIMIT) =>
            {
                Ok(source)
            }
            Some(next) => Err(ParserError::syntax(format!(
                "unexpected {} after source directory, expected where, order by or limit",
                next.lexeme
            ))),
        }
    }

    fn parse_where(&self, cursor: &mut Cursor<'_>) -> ParserResult<Expression> {
        if cursor.peek().is_none() {
            return Err(ParserError::syntax("expected an expression after where"));
        }
        let filter = self.parse_expression(cursor, false)?;

        if !filter.is_function_call() {
            return Err(ParserError::syntax(format!(
                "where expects a function call, found {}",
                filter.display()
            )));
        }
        if let Some(aggregate) = filter.first_aggregate(self.context.functions()) {
            return Err(ParserError::syntax(format!(
                "aggregate function {} is not allowed in where",
                aggregate
            )));
        }
        if let Expression::FunctionCall { name, .. } = &filter {
            let is_predicate = self
                .context
                .functions()
                .lookup(name)
                .map_or(false, |spec| spec.has_tag(TAG_WHERE));
            if !is_predicate {
                return Err(ParserError::syntax(format!(
                    "function {} cannot be used in where, please check the functions supported in where",
                    name
                )));
            }
        }

        match cursor.peek() {
            None => Ok(filter),
            Some(next) if next.is_keyword(KEYWORD_ORDER) || next.is_keyword(KEYWORD_LIMIT) => {
                Ok(filter)
            }
            Some(next) => Err(ParserError::syntax(format!(
                "where expects a single expression, found {}",
                next.lexeme
            ))),
        }
    }

    fn parse_order_by(
        &self,
        cursor: &mut Cursor<'_>,
        projection_count: usize,
    ) -> ParserResult<Vec<OrderKey>> {
        if !cursor.eat_keyword(KEYWORD_BY) {
            return Err(ParserError::syntax("expected by after order"));
        }

        let mut keys = Vec::new();
        loop {
            let token = match cursor.next() {
                Some(token) if token.kind == TokenKind::RawText => token,
                Some(token) => {
                    return Err(ParserError::syntax(format!(
                        "expected an order by position, found {}",
                        token.lexeme
                    )))
                }
                None => return Err(ParserError::syntax("expected an order by position")),
            };

            let position = parse_position(&token.lexeme, projection_count)?;
            let direction = if cursor.eat_keyword(KEYWORD_DESC) {
                SortDirection::Desc
            } else {
                cursor.eat_keyword(KEYWORD_ASC);
                SortDirection::Asc
            };
            keys.push(OrderKey {
                position,
                direction,
            });

            match cursor.peek() {
                None => return Ok(keys),
                Some(next) if next.is_keyword(KEYWORD_LIMIT) => return Ok(keys),
                Some(next) if next.kind == TokenKind::Comma => {
                    cursor.next();
                }
                Some(next) if next.kind == TokenKind::RawText => {
                    return Err(ParserError::syntax(format!(
                        "expected , between order by positions, found {}",
                        next.lexeme
                    )))
                }
                Some(next) => {
                    return Err(ParserError::syntax(format!(
                        "unexpected {} in order by",
                        next.lexeme
                    )))
                }
            }
        }
    }

    fn parse_limit(&self, cursor: &mut Cursor<'_>) -> ParserResult<u32> {
        let token = cursor
            .next()
            .ok_or_else(|| ParserError::syntax("expected a value after limit"))?;
        let limit = token.lexeme.parse::<u32>().map_err(|_| {
            ParserError::syntax(format!(
                "limit value {} must be a non-negative integer",
                token.lexeme
            ))
        })?;

        match cursor.peek() {
            None => Ok(limit),
            Some(next) => Err(ParserError::syntax(format!(
                "unexpected {} after limit",
                next.lexeme
            ))),
        }
    }
}

fn parse_position(lexeme: &str, projection_count: usize) -> ParserResult<usize> {
    let position = lexeme
        .parse::<usize>()
        .ok()
        .filter(|&position| position > 0)
        .ok_or_else(|| {
            ParserError::syntax(format!(
                "order by position {} must be a positive integer",
                lexeme
            ))
        })?;
    if position > projection_count {
        return Err(ParserError::syntax(format!(
            "order by position {} is out of range, the query has {} projections",
            position, projection_count
        )));
    }
    Ok(position)
}

/// Tokenizes and parses `query` against `context`
pub fn parse_query(query: &str, context: &QueryContext) -> ParserResult<SelectQuery> {
    Parser::new(context).parse_str(query)
}
