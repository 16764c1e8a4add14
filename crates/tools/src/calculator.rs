//! Calculator tool — evaluates arithmetic found in free text.
//!
//! The incoming message is sanitized down to digits, `+ - * /`,
//! parentheses, and decimal points, then evaluated with a
//! recursive-descent parser. Supports operator precedence, parentheses,
//! and unary negation. No dependencies beyond std.

use async_trait::async_trait;

use parley_core::error::ToolError;
use parley_core::tool::Tool;

pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "计算器"
    }

    fn description(&self) -> &str {
        "执行基本数学计算 (+, -, *, /)"
    }

    async fn execute(&self, input: &str) -> Result<String, ToolError> {
        let expr = sanitize(input);
        if expr.is_empty() {
            return Err(ToolError::InvalidInput(
                "没有找到有效的数学表达式".into(),
            ));
        }

        let value = evaluate(&expr).map_err(|reason| ToolError::ExecutionFailed {
            tool_name: self.name().to_string(),
            reason,
        })?;

        Ok(format!("计算结果: {} = {}", expr, format_number(value)))
    }
}

/// Strip everything that is not part of an arithmetic expression.
fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || "+-*/().".contains(*c) || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Format nicely: remove trailing .0 for integers.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

// ── Recursive-descent expression evaluator ────────────────────────────────

/// Evaluate an arithmetic expression string.
pub fn evaluate(expr: &str) -> Result<f64, String> {
    let tokens = tokenize(expr)?;
    let mut parser = Parser::new(&tokens);
    let result = parser.parse_expr()?;
    if parser.pos < parser.tokens.len() {
        return Err(format!(
            "Unexpected token at position {}: {:?}",
            parser.pos, parser.tokens[parser.pos]
        ));
    }
    Ok(result)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            c if c.is_whitespace() => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let num_str: String = chars[start..i].iter().collect();
                let num: f64 = num_str
                    .parse()
                    .map_err(|_| format!("Invalid number: {}", num_str))?;
                tokens.push(Token::Number(num));
            }
            c => return Err(format!("Unexpected character: '{}'", c)),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    // expr = term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<f64, String> {
        let mut left = self.parse_term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.consume();
                    left += self.parse_term()?;
                }
                Token::Minus => {
                    self.consume();
                    left -= self.parse_term()?;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // term = unary (('*' | '/') unary)*
    fn parse_term(&mut self) -> Result<f64, String> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.consume();
                    left *= self.parse_unary()?;
                }
                Token::Slash => {
                    self.consume();
                    let right = self.parse_unary()?;
                    if right == 0.0 {
                        return Err("Division by zero".into());
                    }
                    left /= right;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // unary = '-' unary | primary
    fn parse_unary(&mut self) -> Result<f64, String> {
        if let Some(Token::Minus) = self.peek() {
            self.consume();
            let val = self.parse_unary()?;
            return Ok(-val);
        }
        self.parse_primary()
    }

    // primary = NUMBER | '(' expr ')'
    fn parse_primary(&mut self) -> Result<f64, String> {
        match self.consume() {
            Some(Token::Number(n)) => Ok(*n),
            Some(Token::LParen) => {
                let val = self.parse_expr()?;
                match self.consume() {
                    Some(Token::RParen) => Ok(val),
                    _ => Err("Expected closing parenthesis".into()),
                }
            }
            Some(tok) => Err(format!("Unexpected token: {:?}", tok)),
            None => Err("Unexpected end of expression".into()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_addition() {
        assert_eq!(evaluate("2 + 3").unwrap(), 5.0);
    }

    #[test]
    fn operator_precedence() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
    }

    #[test]
    fn parentheses() {
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
    }

    #[test]
    fn division() {
        assert_eq!(evaluate("10 / 4").unwrap(), 2.5);
    }

    #[test]
    fn division_by_zero() {
        assert!(evaluate("1 / 0").is_err());
    }

    #[test]
    fn unary_negation() {
        assert_eq!(evaluate("-5 + 3").unwrap(), -2.0);
    }

    #[test]
    fn invalid_expression() {
        assert!(evaluate("2 +").is_err());
    }

    #[test]
    fn sanitize_strips_prose() {
        assert_eq!(sanitize("请帮我计算 15 + 27"), "15 + 27");
        assert_eq!(sanitize("没有数字"), "");
    }

    #[tokio::test]
    async fn tool_evaluates_embedded_expression() {
        let tool = CalculatorTool;
        let output = tool.execute("请使用计算器帮我算 5 + 3").await.unwrap();
        assert!(output.starts_with("计算结果:"));
        assert!(output.ends_with("= 8"));
    }

    #[tokio::test]
    async fn tool_respects_precedence_in_prose() {
        let tool = CalculatorTool;
        let output = tool.execute("计算 100 * 0.5").await.unwrap();
        assert!(output.ends_with("= 50"));
    }

    #[tokio::test]
    async fn tool_rejects_input_without_expression() {
        let tool = CalculatorTool;
        let err = tool.execute("帮我查询 AI 相关信息").await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
        assert!(err.to_string().contains("没有找到有效的数学表达式"));
    }

    #[tokio::test]
    async fn tool_surfaces_evaluation_failure() {
        let tool = CalculatorTool;
        let err = tool.execute("计算 5 / 0").await.unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed { .. }));
        assert!(err.to_string().contains("Division by zero"));
    }

    #[test]
    fn schema_shape() {
        let schema = CalculatorTool.schema();
        assert_eq!(schema.name, "计算器");
        assert_eq!(schema.kind, "function");
    }
}
