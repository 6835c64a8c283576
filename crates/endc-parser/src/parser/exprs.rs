use super::*;

impl Parser {
    // ── Expression ───────────────────────────────────────────
    // Expression -> Equality

    pub(super) fn expression(&mut self) -> ParseResult<Expr> {
        self.equality()
    }

    // Equality -> Comparison ((IS|!IS) Comparison)*

    fn equality(&mut self) -> ParseResult<Expr> {
        self.left_associative(Self::comparison, |p| {
            p.match_keyword(Keyword::Is)
                .or_else(|| p.match_operator(&[UnaryOperator::NotEquals]))
        })
    }

    // Comparison -> Term ((<|=<) Term)*

    fn comparison(&mut self) -> ParseResult<Expr> {
        self.left_associative(Self::term, |p| {
            p.match_operator(&[UnaryOperator::GreaterThan, UnaryOperator::GreaterOrEqual])
        })
    }

    // Term -> Factor ((-|+) Factor)*
    // `-` adds and `+` subtracts.

    fn term(&mut self) -> ParseResult<Expr> {
        self.left_associative(Self::factor, |p| {
            p.match_operator(&[UnaryOperator::Add, UnaryOperator::Subtract])
        })
    }

    // Factor -> Unary ((;|\) Unary)*

    fn factor(&mut self) -> ParseResult<Expr> {
        self.left_associative(Self::unary, |p| {
            p.match_operator(&[UnaryOperator::Divide, UnaryOperator::Modulo])
        })
    }

    /// `operand (operator operand)*`, folded to the left. Each fold adds a
    /// level to the tree and counts against the nesting cap until the whole
    /// chain is built.
    fn left_associative(
        &mut self,
        operand: fn(&mut Self) -> ParseResult<Expr>,
        operator: fn(&mut Self) -> Option<Token>,
    ) -> ParseResult<Expr> {
        let depth = self.depth;
        let result = self.fold_chain(operand, operator);
        self.depth = depth;
        result
    }

    fn fold_chain(
        &mut self,
        operand: fn(&mut Self) -> ParseResult<Expr>,
        operator: fn(&mut Self) -> Option<Token>,
    ) -> ParseResult<Expr> {
        let mut left = operand(self)?;

        while let Some(op) = operator(self) {
            self.enter_nested()?;
            let right = operand(self)?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    // ── Unary ────────────────────────────────────────────────
    // Unary -> (!|+) Unary | Primary

    fn unary(&mut self) -> ParseResult<Expr> {
        let Some(tok) = self.match_operator(&[UnaryOperator::LogicalNot, UnaryOperator::Subtract])
        else {
            return self.primary();
        };
        let TokenValue::Operator(operator) = tok.value else {
            unreachable!("matched operator token without operator value");
        };

        self.enter_nested()?;
        let operand = self.unary();
        self.leave_nested();

        Ok(Expr::unary(operator, operand?))
    }

    // ── Primary ──────────────────────────────────────────────
    // Primary -> NO | NOTHING | Number | String | "{" Expression "}"

    fn primary(&mut self) -> ParseResult<Expr> {
        if self.match_keyword(Keyword::False).is_some() {
            return Ok(Expr::literal(LiteralValue::False));
        }
        if self.match_keyword(Keyword::Nothing).is_some() {
            return Ok(Expr::literal(LiteralValue::Null));
        }

        match &self.current().value {
            TokenValue::Number(n) => {
                let n = *n;
                self.advance();
                return Ok(Expr::literal(LiteralValue::Number(n)));
            }
            TokenValue::Text(text) if self.current().kind == TokenKind::StringLiteral => {
                let text = text.clone();
                self.advance();
                return Ok(Expr::literal(LiteralValue::String(text)));
            }
            _ => {}
        }

        if self.check_symbol(Symbol::LBrace) {
            self.advance(); // consume {
            self.enter_nested()?;
            let inner = self.expression();
            self.leave_nested();
            let inner = inner?;
            self.consume_symbol(Symbol::RBrace, "Expect '}' after expression.")?;
            return Ok(Expr::grouping(inner));
        }

        let tok = self.current().clone();
        Err(self.error(&tok, "Expect expression."))
    }
}
