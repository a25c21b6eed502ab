//! Arithmetic evaluator for `var` expressions.
//!
//! A deliberately small recursive-descent parser: decimal literals, the four
//! basic operators with standard precedence, unary minus and parentheses.
//! Variable references and any other construct fail the evaluation, so no
//! general expression-execution capability exists here.

/// Evaluate an expression, or `None` if it cannot be evaluated.
pub fn eval(expr: &str) -> Option<f64> {
    let mut parser = Parser {
        bytes: expr.as_bytes(),
        pos: 0,
    };
    let value = parser.additive()?;
    parser.skip_whitespace();
    if parser.pos != parser.bytes.len() {
        return None;
    }
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.bytes.get(self.pos).copied()
    }

    fn additive(&mut self) -> Option<f64> {
        let mut value = self.multiplicative()?;
        loop {
            match self.peek() {
                Some(b'+') => {
                    self.pos += 1;
                    value += self.multiplicative()?;
                }
                Some(b'-') => {
                    self.pos += 1;
                    value -= self.multiplicative()?;
                }
                _ => return Some(value),
            }
        }
    }

    fn multiplicative(&mut self) -> Option<f64> {
        let mut value = self.primary()?;
        loop {
            match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    value *= self.primary()?;
                }
                Some(b'/') => {
                    self.pos += 1;
                    value /= self.primary()?;
                }
                _ => return Some(value),
            }
        }
    }

    fn primary(&mut self) -> Option<f64> {
        match self.peek()? {
            b'-' => {
                self.pos += 1;
                Some(-self.primary()?)
            }
            b'(' => {
                self.pos += 1;
                let value = self.additive()?;
                if self.peek()? != b')' {
                    return None;
                }
                self.pos += 1;
                Some(value)
            }
            _ => self.number(),
        }
    }

    fn number(&mut self) -> Option<f64> {
        self.skip_whitespace();
        let start = self.pos;
        while self.pos < self.bytes.len()
            && (self.bytes[self.pos].is_ascii_digit() || self.bytes[self.pos] == b'.')
        {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()?
            .parse()
            .ok()
    }
}
