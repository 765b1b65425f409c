//! SQL function surface over the numeric primitives.
//!
//! A host SQL engine registers [`MathExtension`] and dispatches calls by
//! name with dynamically typed [`Value`] arguments. Semantics follow SQL
//! rather than IEEE-754: a missing or non-numeric argument, or an input
//! outside a function's domain (`SQRT(-1)`, `LN(0)`, `MOD(x, 0)`), gives
//! `NULL` instead of `NaN`.

use std::sync::Mutex;

use crate::error::ExtensionError;
use crate::random::{self, Generator};
use crate::scalar;

/// A dynamically typed SQL value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// SQL `NULL`.
    Null,
    /// 64-bit signed integer.
    Integer(i64),
    /// Double-precision float.
    Real(f64),
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Blob(Vec<u8>),
}

impl Value {
    /// Numeric view of the value: integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Real(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer view of the value: reals truncate toward zero.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            Value::Real(v) => Some(*v as i64),
            _ => None,
        }
    }
}

/// A named bundle of SQL functions.
pub trait Extension: Send + Sync {
    /// Registration name.
    fn name(&self) -> &str;

    /// One-line human-readable description.
    fn description(&self) -> &str;

    /// Upper-case names of every function [`call`](Self::call) accepts.
    fn functions(&self) -> &[&'static str];

    /// Evaluate `name(args...)`. Names are case-insensitive.
    fn call(&self, name: &str, args: &[Value]) -> Result<Value, ExtensionError>;
}

const FUNCTIONS: &[&str] = &[
    "ABS",
    "CEIL",
    "CEILING",
    "FLOOR",
    "ROUND",
    "POWER",
    "POW",
    "SQRT",
    "MOD",
    "PI",
    "EXP",
    "LN",
    "LOG",
    "LOG2",
    "LOG10",
    "SIGN",
    "RANDOM",
    "RANDOMBLOB",
    "ZEROBLOB",
];

/// The math extension: scalar functions plus `RANDOM`, `RANDOMBLOB` and
/// `ZEROBLOB`.
///
/// Owns one generator behind a mutex, so a single instance can serve
/// concurrent queries.
#[derive(Debug)]
pub struct MathExtension {
    rng: Mutex<Generator>,
}

impl Default for MathExtension {
    /// Seeded from `NUMPRIM_SEED` when set, otherwise from entropy.
    fn default() -> Self {
        Self::new(Generator::from_env())
    }
}

impl MathExtension {
    /// Build the extension around an explicit generator.
    pub fn new(generator: Generator) -> Self {
        Self {
            rng: Mutex::new(generator),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut Generator) -> T) -> Result<T, ExtensionError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| ExtensionError::GeneratorPoisoned)?;
        Ok(f(&mut *rng))
    }
}

impl Extension for MathExtension {
    fn name(&self) -> &str {
        "math"
    }

    fn description(&self) -> &str {
        "Math extension"
    }

    fn functions(&self) -> &[&'static str] {
        FUNCTIONS
    }

    fn call(&self, name: &str, args: &[Value]) -> Result<Value, ExtensionError> {
        let value = match name.to_ascii_uppercase().as_str() {
            "ABS" => eval_abs(args),
            "CEIL" | "CEILING" => eval_rounding(args, scalar::ceil),
            "FLOOR" => eval_rounding(args, scalar::floor),
            "ROUND" => eval_round(args),
            "POWER" | "POW" => binary(args, |b, e| Some(scalar::power(b, e))),
            "SQRT" => unary(args, |v| (v >= 0.0).then(|| scalar::sqrt(v))),
            "MOD" => eval_mod(args),
            "PI" => Value::Real(scalar::PI),
            "EXP" => unary(args, |v| Some(scalar::exp(v))),
            "LN" => unary(args, |v| (v > 0.0).then(|| scalar::ln(v))),
            "LOG" => eval_log(args),
            "LOG2" => unary(args, |v| (v > 0.0).then(|| scalar::log2(v))),
            "LOG10" => unary(args, |v| (v > 0.0).then(|| scalar::log10(v))),
            "SIGN" => eval_sign(args),
            "RANDOM" => Value::Integer(self.with_rng(|g| g.next_i64())?),
            "RANDOMBLOB" => {
                let n = blob_size(args);
                Value::Blob(self.with_rng(|g| g.random_blob(n))?.unwrap_or_default())
            }
            "ZEROBLOB" => Value::Blob(random::zero_blob(blob_size(args)).unwrap_or_default()),
            _ => {
                return Err(ExtensionError::UnknownFunction {
                    name: name.to_string(),
                })
            }
        };
        Ok(value)
    }
}

fn unary(args: &[Value], f: impl FnOnce(f64) -> Option<f64>) -> Value {
    args.first()
        .and_then(Value::as_f64)
        .and_then(f)
        .map_or(Value::Null, Value::Real)
}

fn binary(args: &[Value], f: impl FnOnce(f64, f64) -> Option<f64>) -> Value {
    match (args.first().and_then(Value::as_f64), args.get(1).and_then(Value::as_f64)) {
        (Some(a), Some(b)) => f(a, b).map_or(Value::Null, Value::Real),
        _ => Value::Null,
    }
}

// ABS and the rounding family hand text and blobs back unchanged.
fn eval_abs(args: &[Value]) -> Value {
    match args.first() {
        None => Value::Null,
        Some(Value::Integer(v)) => Value::Integer(scalar::abs_int(*v)),
        Some(Value::Real(v)) => Value::Real(scalar::abs_double(*v)),
        Some(other) => other.clone(),
    }
}

fn eval_rounding(args: &[Value], f: fn(f64) -> f64) -> Value {
    match args.first() {
        None => Value::Null,
        Some(Value::Real(v)) => Value::Real(f(*v)),
        Some(other) => other.clone(),
    }
}

fn eval_round(args: &[Value]) -> Value {
    let decimals = args
        .get(1)
        .and_then(Value::as_i64)
        .map_or(0, |d| d.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
    match args.first() {
        None => Value::Null,
        Some(Value::Integer(v)) if decimals == 0 => Value::Integer(*v),
        Some(Value::Integer(v)) => Value::Real(scalar::round(*v as f64, decimals)),
        Some(Value::Real(v)) => Value::Real(scalar::round(*v, decimals)),
        Some(other) => other.clone(),
    }
}

fn eval_mod(args: &[Value]) -> Value {
    if let (Some(Value::Integer(a)), Some(Value::Integer(b))) = (args.first(), args.get(1)) {
        if *b == 0 {
            return Value::Null;
        }
        return Value::Integer(a.wrapping_rem(*b));
    }
    binary(args, |a, b| (b != 0.0).then(|| scalar::modulo(a, b)))
}

fn eval_log(args: &[Value]) -> Value {
    if args.len() == 1 {
        return unary(args, |v| (v > 0.0).then(|| scalar::ln(v)));
    }
    binary(args, |base, v| {
        (base > 0.0 && base != 1.0 && v > 0.0).then(|| scalar::log(base, v))
    })
}

fn eval_sign(args: &[Value]) -> Value {
    match args.first() {
        Some(Value::Integer(v)) => Value::Integer(scalar::sign_int(*v)),
        Some(Value::Real(v)) => Value::Real(scalar::sign_double(*v)),
        _ => Value::Null,
    }
}

fn blob_size(args: &[Value]) -> i64 {
    args.first().and_then(Value::as_i64).unwrap_or(0)
}
