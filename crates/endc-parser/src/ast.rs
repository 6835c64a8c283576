use endc_lexer::{Token, UnaryOperator};

/// Literal payloads the grammar can produce
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    String(String),
    /// `NO`; the language has no literal for true
    False,
    /// `NOTHING`
    Null,
}

/// Expression tree. Each node owns its children.
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(LiteralValue),
    Grouping(Box<Expr>),
    Unary {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn literal(value: LiteralValue) -> Self {
        Expr::Literal(value)
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping(Box::new(inner))
    }

    pub fn unary(operator: UnaryOperator, operand: Expr) -> Self {
        Expr::Unary { operator, operand: Box::new(operand) }
    }

    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary { left: Box::new(left), operator, right: Box::new(right) }
    }

    /// Hand the node to the visitor method matching its variant
    pub fn accept<V: ExprVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Literal(value) => visitor.visit_literal(value),
            Expr::Grouping(inner) => visitor.visit_grouping(inner),
            Expr::Unary { operator, operand } => visitor.visit_unary(*operator, operand),
            Expr::Binary { left, operator, right } => visitor.visit_binary(left, operator, right),
        }
    }
}

/// Structural equality: operator tokens compare by identity, not location.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expr::Literal(a), Expr::Literal(b)) => a == b,
            (Expr::Grouping(a), Expr::Grouping(b)) => a == b,
            (
                Expr::Unary { operator: op_a, operand: a },
                Expr::Unary { operator: op_b, operand: b },
            ) => op_a == op_b && a == b,
            (
                Expr::Binary { left: la, operator: op_a, right: ra },
                Expr::Binary { left: lb, operator: op_b, right: rb },
            ) => op_a.value == op_b.value && la == lb && ra == rb,
            _ => false,
        }
    }
}

/// One handler per node variant
pub trait ExprVisitor {
    type Output;

    fn visit_literal(&mut self, value: &LiteralValue) -> Self::Output;
    fn visit_grouping(&mut self, inner: &Expr) -> Self::Output;
    fn visit_unary(&mut self, operator: UnaryOperator, operand: &Expr) -> Self::Output;
    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Self::Output;
}
