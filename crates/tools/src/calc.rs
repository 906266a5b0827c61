//! Whitelisted arithmetic evaluation
//!
//! Expressions are checked against a strict character whitelist before
//! parsing, then evaluated with a small recursive-descent parser over
//! `+ - * / ( )`. There is no general expression evaluator anywhere in
//! this path.

/// Arithmetic failures, split so the tool layer can report the same
/// two strings the assistant has always used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    /// Expression contains characters outside the whitelist
    InvalidExpression,
    /// Expression is malformed or cannot be evaluated
    CalculationError,
}

/// Evaluate an arithmetic expression
pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    if expression.trim().is_empty() {
        return Err(CalcError::InvalidExpression);
    }
    if !expression
        .chars()
        .all(|c| c.is_ascii_digit() || "+-*/(). \t".contains(c))
    {
        return Err(CalcError::InvalidExpression);
    }

    let tokens: Vec<char> = expression.chars().filter(|c| !c.is_whitespace()).collect();
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(CalcError::CalculationError);
    }
    if !value.is_finite() {
        return Err(CalcError::CalculationError);
    }
    Ok(value)
}

/// Render a result the way a calculator would: no trailing `.0` on
/// whole numbers
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

struct Parser {
    tokens: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    // expr := term (('+'|'-') term)*
    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                '+' => {
                    self.bump();
                    value += self.term()?;
                }
                '-' => {
                    self.bump();
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    // term := factor (('*'|'/') factor)*
    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                '*' => {
                    self.bump();
                    value *= self.factor()?;
                }
                '/' => {
                    self.bump();
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(CalcError::CalculationError);
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    // factor := ('+'|'-')* primary
    fn factor(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some('-') => {
                self.bump();
                Ok(-self.factor()?)
            }
            Some('+') => {
                self.bump();
                self.factor()
            }
            _ => self.primary(),
        }
    }

    // primary := number | '(' expr ')'
    fn primary(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some('(') => {
                self.bump();
                let value = self.expr()?;
                if self.bump() != Some(')') {
                    return Err(CalcError::CalculationError);
                }
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            _ => Err(CalcError::CalculationError),
        }
    }

    fn number(&mut self) -> Result<f64, CalcError> {
        let start = self.pos;
        let mut saw_dot = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.pos += 1;
            } else if c == '.' && !saw_dot {
                saw_dot = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        let text: String = self.tokens[start..self.pos].iter().collect();
        text.parse().map_err(|_| CalcError::CalculationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("2+2*5").unwrap(), 12.0);
        assert_eq!(evaluate("(2+2)*5").unwrap(), 20.0);
        assert_eq!(evaluate("10/4").unwrap(), 2.5);
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(evaluate("-3+5").unwrap(), 2.0);
        assert_eq!(evaluate("2*-3").unwrap(), -6.0);
    }

    #[test]
    fn test_whitespace_and_decimals() {
        assert_eq!(evaluate(" 1.5 + 2.5 ").unwrap(), 4.0);
    }

    #[test]
    fn test_whitelist_rejects_code() {
        assert_eq!(evaluate("import os"), Err(CalcError::InvalidExpression));
        assert_eq!(evaluate("2+x"), Err(CalcError::InvalidExpression));
        assert_eq!(evaluate(""), Err(CalcError::InvalidExpression));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(evaluate("2+"), Err(CalcError::CalculationError));
        assert_eq!(evaluate("(2+3"), Err(CalcError::CalculationError));
        assert_eq!(evaluate("1/0"), Err(CalcError::CalculationError));
        assert_eq!(evaluate("1..2"), Err(CalcError::CalculationError));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-4.0), "-4");
    }
}
