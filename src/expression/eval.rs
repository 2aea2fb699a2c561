use crate::expression::ast::{BinaryOp, Builtin, Expr, Lit, UnaryOp, Var};
use crate::foundation::math::js_number;

/// Result of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Floating point number.
    Num(f64),
    /// Text.
    Str(String),
    /// Boolean.
    Bool(bool),
}

impl Value {
    /// Numeric view, following ECMAScript `ToNumber` for strings and booleans.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Num(v) => *v,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Str(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse().unwrap_or(f64::NAN)
                }
            }
        }
    }

    /// Truthiness as used by `!`, `&&`, `||` and `?:`.
    pub fn truthy(&self) -> bool {
        match self {
            Self::Num(v) => *v != 0.0 && !v.is_nan(),
            Self::Bool(b) => *b,
            Self::Str(s) => !s.is_empty(),
        }
    }

    /// Text form used when interpolating into a template.
    pub fn to_text(&self) -> String {
        match self {
            Self::Num(v) => js_number(*v),
            Self::Bool(b) => b.to_string(),
            Self::Str(s) => s.clone(),
        }
    }
}

/// Values bound to the two names an expression may read.
#[derive(Debug, Clone, PartialEq)]
pub struct Bindings {
    /// Normalized animation position.
    pub x: Value,
    /// Frame index (numeric for attribute directives, zero-padded text for filenames).
    pub frame: Value,
}

impl Bindings {
    /// Bindings for a non-animated item: position `0`, frame `0`.
    pub fn still() -> Self {
        Self {
            x: Value::Num(0.0),
            frame: Value::Num(0.0),
        }
    }

    /// Bindings for per-frame attribute directives.
    pub fn for_attributes(position: f64, frame: u32) -> Self {
        Self {
            x: Value::Num(position),
            frame: Value::Num(f64::from(frame)),
        }
    }

    /// Bindings for filename patterns, where `frame` is the zero-padded frame string.
    pub fn for_filename(position: f64, padded_frame: impl Into<String>) -> Self {
        Self {
            x: Value::Num(position),
            frame: Value::Str(padded_frame.into()),
        }
    }
}

pub(crate) fn eval(expr: &Expr, env: &Bindings) -> Value {
    match expr {
        Expr::Lit(Lit::Num(v)) => Value::Num(*v),
        Expr::Lit(Lit::Str(s)) => Value::Str(s.clone()),
        Expr::Lit(Lit::Bool(b)) => Value::Bool(*b),
        Expr::Var(Var::X) => env.x.clone(),
        Expr::Var(Var::Frame) => env.frame.clone(),
        Expr::Unary { op, expr } => {
            let v = eval(expr, env);
            match op {
                UnaryOp::Neg => Value::Num(-v.to_number()),
                UnaryOp::Not => Value::Bool(!v.truthy()),
            }
        }
        Expr::Binary {
            op: BinaryOp::And,
            left,
            right,
        } => {
            let l = eval(left, env);
            if l.truthy() { eval(right, env) } else { l }
        }
        Expr::Binary {
            op: BinaryOp::Or,
            left,
            right,
        } => {
            let l = eval(left, env);
            if l.truthy() { l } else { eval(right, env) }
        }
        Expr::Binary { op, left, right } => binary(*op, eval(left, env), eval(right, env)),
        Expr::Conditional {
            cond,
            then,
            otherwise,
        } => {
            if eval(cond, env).truthy() {
                eval(then, env)
            } else {
                eval(otherwise, env)
            }
        }
        Expr::Call { func, args } => {
            let args: Vec<f64> = args.iter().map(|a| eval(a, env).to_number()).collect();
            Value::Num(call_builtin(*func, &args))
        }
    }
}

fn binary(op: BinaryOp, l: Value, r: Value) -> Value {
    match op {
        BinaryOp::Add => match (&l, &r) {
            (Value::Str(_), _) | (_, Value::Str(_)) => {
                Value::Str(format!("{}{}", l.to_text(), r.to_text()))
            }
            _ => Value::Num(l.to_number() + r.to_number()),
        },
        BinaryOp::Sub => Value::Num(l.to_number() - r.to_number()),
        BinaryOp::Mul => Value::Num(l.to_number() * r.to_number()),
        BinaryOp::Div => Value::Num(l.to_number() / r.to_number()),
        BinaryOp::Mod => Value::Num(l.to_number() % r.to_number()),
        BinaryOp::Eq => Value::Bool(loose_eq(&l, &r)),
        BinaryOp::Ne => Value::Bool(!loose_eq(&l, &r)),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let ord = match (&l, &r) {
                (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
                _ => l.to_number().partial_cmp(&r.to_number()),
            };
            let Some(ord) = ord else {
                return Value::Bool(false);
            };
            Value::Bool(match op {
                BinaryOp::Lt => ord.is_lt(),
                BinaryOp::Le => ord.is_le(),
                BinaryOp::Gt => ord.is_gt(),
                _ => ord.is_ge(),
            })
        }
        // Short-circuit operators are handled in `eval`.
        BinaryOp::And | BinaryOp::Or => Value::Bool(false),
    }
}

fn loose_eq(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        _ => l.to_number() == r.to_number(),
    }
}

fn call_builtin(func: Builtin, args: &[f64]) -> f64 {
    let a = |i: usize| args.get(i).copied().unwrap_or(f64::NAN);
    match func {
        Builtin::Min => args.iter().copied().fold(f64::INFINITY, js_min),
        Builtin::Max => args.iter().copied().fold(f64::NEG_INFINITY, js_max),
        Builtin::Abs => a(0).abs(),
        Builtin::Floor => a(0).floor(),
        Builtin::Ceil => a(0).ceil(),
        // ECMAScript rounds halves towards +infinity.
        Builtin::Round => (a(0) + 0.5).floor(),
        Builtin::Sqrt => a(0).sqrt(),
        Builtin::Pow => a(0).powf(a(1)),
        Builtin::Sin => a(0).sin(),
        Builtin::Cos => a(0).cos(),
        Builtin::Tan => a(0).tan(),
        Builtin::Clamp => js_min(js_max(a(0), a(1)), a(2)),
        Builtin::Lerp => a(0) + (a(1) - a(0)) * a(2),
    }
}

fn js_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

fn js_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/eval.rs"]
mod tests;
