//! Built-in scalar functions
//!
//! Arity is validated by the registry before a body runs, so bodies index
//! their arguments directly.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{Datelike, NaiveDateTime};
use regex::Regex;

use super::clock::Clock;
use super::errors::{FunctionError, FunctionResult};
use super::registry::{Arity, FunctionSpec, TAG_WHERE};
use super::value::Value;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Upper bound on cached `like` patterns; the cache is cleared when full
const PATTERN_CACHE_CAPACITY: usize = 256;

/// Compiled `like` patterns keyed by pattern text
static PATTERN_CACHE: OnceLock<Mutex<HashMap<String, Regex>>> = OnceLock::new();

/// The built-in scalar catalog, in registration order
pub fn catalog() -> Vec<FunctionSpec> {
    use Arity::*;

    vec![
        // comparison and logic
        FunctionSpec::scalar("eq", Exactly(2), eq).aliases(&["equal", "equals"]).tags(&[TAG_WHERE]),
        FunctionSpec::scalar("ne", Exactly(2), ne).aliases(&["notequal"]).tags(&[TAG_WHERE]),
        FunctionSpec::scalar("lt", Exactly(2), lt).aliases(&["lessthan"]).tags(&[TAG_WHERE]),
        FunctionSpec::scalar("le", Exactly(2), le).aliases(&["lte", "lessequal"]).tags(&[TAG_WHERE]),
        FunctionSpec::scalar("gt", Exactly(2), gt).aliases(&["greaterthan"]).tags(&[TAG_WHERE]),
        FunctionSpec::scalar("ge", Exactly(2), ge).aliases(&["gte", "greaterequal"]).tags(&[TAG_WHERE]),
        FunctionSpec::scalar("and", AtLeast(2), and).tags(&[TAG_WHERE]),
        FunctionSpec::scalar("or", AtLeast(2), or).tags(&[TAG_WHERE]),
        FunctionSpec::scalar("not", Exactly(1), not).tags(&[TAG_WHERE]),
        FunctionSpec::scalar("like", Exactly(2), like).tags(&[TAG_WHERE]),
        FunctionSpec::scalar("contains", Exactly(2), contains).tags(&[TAG_WHERE]),
        FunctionSpec::scalar("startswith", Exactly(2), starts_with).aliases(&["prefix"]).tags(&[TAG_WHERE]),
        FunctionSpec::scalar("endswith", Exactly(2), ends_with).aliases(&["suffix"]).tags(&[TAG_WHERE]),
        FunctionSpec::scalar("isempty", Exactly(1), is_empty).aliases(&["blank"]).tags(&[TAG_WHERE]),
        // strings
        FunctionSpec::scalar("lower", Exactly(1), lower).aliases(&["low"]),
        FunctionSpec::scalar("upper", Exactly(1), upper).aliases(&["up"]),
        FunctionSpec::scalar("title", Exactly(1), title),
        FunctionSpec::scalar("base64", Exactly(1), base64).aliases(&["b64"]),
        FunctionSpec::scalar("length", Exactly(1), length).aliases(&["len"]),
        FunctionSpec::scalar("ltrim", Exactly(1), ltrim).aliases(&["lefttrim"]),
        FunctionSpec::scalar("rtrim", Exactly(1), rtrim).aliases(&["righttrim"]),
        FunctionSpec::scalar("trim", Exactly(1), trim),
        FunctionSpec::scalar("concat", AtLeast(1), concat),
        FunctionSpec::scalar("concatws", AtLeast(2), concat_ws),
        FunctionSpec::scalar("substr", Between(2, 3), substr).aliases(&["substring"]),
        FunctionSpec::scalar("replace", Exactly(3), replace),
        FunctionSpec::scalar("reverse", Exactly(1), reverse).aliases(&["rev"]),
        // arithmetic
        FunctionSpec::scalar("add", AtLeast(2), add).aliases(&["addition"]),
        FunctionSpec::scalar("sub", Exactly(2), sub).aliases(&["subtract"]),
        FunctionSpec::scalar("mul", AtLeast(2), mul).aliases(&["multiply"]),
        FunctionSpec::scalar("div", Exactly(2), div).aliases(&["divide"]),
        // time
        FunctionSpec::scalar("now", Exactly(0), now).aliases(&["currenttime"]),
        FunctionSpec::scalar("day", Between(0, 1), day),
        FunctionSpec::scalar("date", Between(0, 1), date),
        FunctionSpec::scalar("month", Between(0, 1), month).aliases(&["mon"]),
        FunctionSpec::scalar("year", Between(0, 1), year).aliases(&["yr"]),
        FunctionSpec::scalar("dayofweek", Between(0, 1), day_of_week).aliases(&["weekday"]),
        FunctionSpec::scalar("daydiff", Exactly(2), day_diff),
        FunctionSpec::scalar("hourdiff", Exactly(2), hour_diff),
        // misc
        FunctionSpec::scalar("cwd", Exactly(0), cwd).aliases(&["wd"]),
        FunctionSpec::scalar("identity", Exactly(1), identity),
    ]
}

fn boolean_text(value: &Value) -> Option<bool> {
    match value {
        Value::Boolean(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// Compares two values, numerically when one side is a number and the
/// other parses as one, and as booleans when one side is a boolean and the
/// other reads `true` or `false`.
fn compare_loosely(a: &Value, b: &Value) -> Ordering {
    let numeric = |v: &Value| matches!(v, Value::Int(_) | Value::Float(_));
    if numeric(a) || numeric(b) {
        if let (Ok(x), Ok(y)) = (a.as_float(), b.as_float()) {
            return x.total_cmp(&y);
        }
    }
    if matches!(a, Value::Boolean(_)) || matches!(b, Value::Boolean(_)) {
        if let (Some(x), Some(y)) = (boolean_text(a), boolean_text(b)) {
            return x.cmp(&y);
        }
    }
    a.compare_to(b)
}

fn eq(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Boolean(compare_loosely(&args[0], &args[1]) == Ordering::Equal))
}

fn ne(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Boolean(compare_loosely(&args[0], &args[1]) != Ordering::Equal))
}

fn lt(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Boolean(compare_loosely(&args[0], &args[1]) == Ordering::Less))
}

fn le(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Boolean(compare_loosely(&args[0], &args[1]) != Ordering::Greater))
}

fn gt(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Boolean(compare_loosely(&args[0], &args[1]) == Ordering::Greater))
}

fn ge(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Boolean(compare_loosely(&args[0], &args[1]) != Ordering::Less))
}

fn boolean(value: &Value) -> FunctionResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| FunctionError::incorrect_type("boolean", value.type_name()))
}

fn and(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    let mut result = true;
    for arg in args {
        result &= boolean(arg)?;
    }
    Ok(Value::Boolean(result))
}

fn or(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    let mut result = false;
    for arg in args {
        result |= boolean(arg)?;
    }
    Ok(Value::Boolean(result))
}

fn not(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Boolean(!boolean(&args[0])?))
}

/// Translates a `*` / `?` wildcard into an anchored regex
fn wildcard_regex(pattern: &str) -> FunctionResult<Regex> {
    let mut translated = String::with_capacity(pattern.len() + 8);
    translated.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => translated.push_str(".*"),
            '?' => translated.push('.'),
            other => translated.push_str(&regex::escape(&other.to_string())),
        }
    }
    translated.push('$');
    Regex::new(&translated).map_err(|e| FunctionError::incorrect_type("pattern", e.to_string()))
}

/// Compiles `pattern` as a regex, falling back to a wildcard
fn compile_pattern(pattern: &str) -> FunctionResult<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Ok(regex),
        Err(_) => wildcard_regex(pattern),
    }
}

/// Cached compile; a scan evaluates the same pattern once per entry
fn cached_pattern(pattern: &str) -> FunctionResult<Regex> {
    let cache = PATTERN_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    if let Some(regex) = cache
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(pattern)
    {
        return Ok(regex.clone());
    }

    let regex = compile_pattern(pattern)?;
    let mut cached = cache.lock().unwrap_or_else(PoisonError::into_inner);
    if cached.len() >= PATTERN_CACHE_CAPACITY {
        cached.clear();
    }
    cached.insert(pattern.to_string(), regex.clone());
    Ok(regex)
}

fn like(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    let regex = cached_pattern(&args[1].as_text())?;
    Ok(Value::Boolean(regex.is_match(&args[0].as_text())))
}

fn contains(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Boolean(args[0].as_text().contains(&args[1].as_text())))
}

fn starts_with(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Boolean(args[0].as_text().starts_with(&args[1].as_text())))
}

fn ends_with(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Boolean(args[0].as_text().ends_with(&args[1].as_text())))
}

fn is_empty(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Boolean(args[0].as_text().trim().is_empty()))
}

fn lower(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::String(args[0].as_text().to_lowercase()))
}

fn upper(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::String(args[0].as_text().to_uppercase()))
}

fn title(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    let mut titled = String::new();
    let mut at_word_start = true;
    for ch in args[0].as_text().chars() {
        if at_word_start && ch.is_alphanumeric() {
            titled.extend(ch.to_uppercase());
        } else {
            titled.push(ch);
        }
        at_word_start = !ch.is_alphanumeric();
    }
    Ok(Value::String(titled))
}

fn base64(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::String(STANDARD.encode(args[0].as_text())))
}

fn length(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Int(args[0].as_text().chars().count() as i64))
}

fn ltrim(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::String(args[0].as_text().trim_start().to_string()))
}

fn rtrim(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::String(args[0].as_text().trim_end().to_string()))
}

fn trim(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::String(args[0].as_text().trim().to_string()))
}

fn concat(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::String(args.iter().map(Value::as_text).collect()))
}

/// Joins all but the last argument with the last argument
fn concat_ws(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    let (separator, parts) = match args.split_last() {
        Some((separator, parts)) => (separator.as_text(), parts),
        None => return Ok(Value::String(String::new())),
    };
    let parts: Vec<String> = parts.iter().map(Value::as_text).collect();
    Ok(Value::String(parts.join(&separator)))
}

fn substring_index(value: &Value) -> FunctionResult<usize> {
    let index = match value {
        Value::Int(index) => *index,
        other => other
            .as_text()
            .trim()
            .parse::<i64>()
            .map_err(|_| FunctionError::incorrect_type("integer", other.type_name()))?,
    };
    usize::try_from(index).map_err(|_| {
        FunctionError::range("expected the from and to index to be non-negative integers")
    })
}

/// `substr(s, from[, to])` with a 0-based `from` and an inclusive `to`.
///
/// A `from` at or past the end returns `s` unchanged.
fn substr(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    let text = args[0].as_text();
    let from = substring_index(&args[1])?;
    let to = match args.get(2) {
        Some(value) => Some(substring_index(value)?),
        None => None,
    };

    let chars: Vec<char> = text.chars().collect();
    if from >= chars.len() {
        return Ok(Value::String(text));
    }
    let end = match to {
        Some(to) if to < from => {
            return Err(FunctionError::range(
                "expected the end index to be greater than the from index in substr",
            ))
        }
        Some(to) => chars.len().min(to + 1),
        None => chars.len(),
    };
    Ok(Value::String(chars[from..end].iter().collect()))
}

fn replace(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    let text = args[0].as_text();
    Ok(Value::String(text.replace(&args[1].as_text(), &args[2].as_text())))
}

fn reverse(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::String(args[0].as_text().chars().rev().collect()))
}

fn add(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    let mut sum = 0.0;
    for arg in args {
        sum += arg.as_float()?;
    }
    Ok(Value::Float(sum))
}

fn sub(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Float(args[0].as_float()? - args[1].as_float()?))
}

fn mul(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    let mut product = 1.0;
    for arg in args {
        product *= arg.as_float()?;
    }
    Ok(Value::Float(product))
}

fn div(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    let numerator = args[0].as_float()?;
    let denominator = args[1].as_float()?;
    if denominator == 0.0 {
        return Err(FunctionError::DivisionByZero);
    }
    Ok(Value::Float(numerator / denominator))
}

fn now(clock: &dyn Clock, _: &[Value]) -> FunctionResult<Value> {
    Ok(Value::DateTime(clock.now()))
}

/// The optional timestamp argument, or the clock's current time
fn instant(clock: &dyn Clock, args: &[Value]) -> FunctionResult<NaiveDateTime> {
    match args.first() {
        None => Ok(clock.now()),
        Some(value) => value
            .as_datetime()
            .ok_or_else(|| FunctionError::incorrect_type("datetime", value.type_name())),
    }
}

fn day(clock: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Int(instant(clock, args)?.day() as i64))
}

fn date(clock: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::String(instant(clock, args)?.format("%Y-%B-%d").to_string()))
}

fn month(clock: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::String(instant(clock, args)?.format("%B").to_string()))
}

fn year(clock: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Int(instant(clock, args)?.year() as i64))
}

fn day_of_week(clock: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::String(instant(clock, args)?.format("%A").to_string()))
}

fn elapsed_millis(args: &[Value]) -> FunctionResult<f64> {
    let first = args[0]
        .as_datetime()
        .ok_or_else(|| FunctionError::incorrect_type("datetime", args[0].type_name()))?;
    let second = args[1]
        .as_datetime()
        .ok_or_else(|| FunctionError::incorrect_type("datetime", args[1].type_name()))?;
    Ok((first - second).num_milliseconds() as f64)
}

fn day_diff(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Float(elapsed_millis(args)? / MILLIS_PER_DAY))
}

fn hour_diff(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(Value::Float(elapsed_millis(args)? / MILLIS_PER_HOUR))
}

fn cwd(_: &dyn Clock, _: &[Value]) -> FunctionResult<Value> {
    Ok(std::env::current_dir()
        .map(|dir| Value::String(dir.to_string_lossy().into_owned()))
        .unwrap_or(Value::Empty))
}

fn identity(_: &dyn Clock, args: &[Value]) -> FunctionResult<Value> {
    Ok(args[0].clone())
}

#[cfg(test)]
mod tests {
    use super::super::clock::FixedClock;
    use super::super::registry::FunctionRegistry;
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn registry() -> FunctionRegistry {
        FunctionRegistry::new()
    }

    fn fixed(y: i32, m: u32, d: u32) -> FunctionRegistry {
        let instant = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(15, 8, 0)
            .unwrap();
        FunctionRegistry::with_clock(Arc::new(FixedClock::new(instant)))
    }

    fn text(value: Value) -> String {
        match value {
            Value::String(s) => s,
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_arithmetic() {
        let r = registry();
        assert_eq!(
            r.execute("add", &["1".into(), Value::Int(2), Value::Int(4)]).unwrap(),
            Value::Float(7.0)
        );
        assert_eq!(r.execute("sub", &["1".into(), Value::Int(2)]).unwrap(), Value::Float(-1.0));
        assert_eq!(r.execute("mul", &["6".into(), Value::Int(8)]).unwrap(), Value::Float(48.0));
        assert_eq!(r.execute("div", &["9".into(), Value::Int(2)]).unwrap(), Value::Float(4.5));
        assert_eq!(r.execute("div", &["9".into(), Value::Int(-2)]).unwrap(), Value::Float(-4.5));
    }

    #[test]
    fn test_arithmetic_failures() {
        let r = registry();
        let err = r.execute("div", &["9".into(), Value::Int(0)]).unwrap_err();
        assert_eq!(err.root(), &FunctionError::DivisionByZero);

        let err = r.execute("add", &["x".into(), Value::Int(1)]).unwrap_err();
        assert_eq!(err.root(), &FunctionError::NonNumeric);
        assert!(err.to_string().contains("[Function add]"));
    }

    #[test]
    fn test_case_functions_and_aliases() {
        let r = registry();
        assert_eq!(text(r.execute("lower", &["ABC".into()]).unwrap()), "abc");
        assert_eq!(text(r.execute("low", &["ABC".into()]).unwrap()), "abc");
        assert_eq!(text(r.execute("up", &["abc".into()]).unwrap()), "ABC");
        assert_eq!(text(r.execute("title", &["Sample content".into()]).unwrap()), "Sample Content");
        assert!(r.execute("low", &[]).is_err());
        assert!(r.execute("title", &[]).is_err());
    }

    #[test]
    fn test_base64_length_and_trim() {
        let r = registry();
        assert_eq!(text(r.execute("b64", &["a".into()]).unwrap()), "YQ==");
        assert_eq!(r.execute("len", &["sample".into()]).unwrap(), Value::Int(6));
        assert_eq!(text(r.execute("lTrim", &["  sample".into()]).unwrap()), "sample");
        assert_eq!(text(r.execute("rTrim", &["sample  ".into()]).unwrap()), "sample");
        assert_eq!(text(r.execute("trim", &["  sample  ".into()]).unwrap()), "sample");
    }

    #[test]
    fn test_concat_functions() {
        let r = registry();
        assert_eq!(text(r.execute("concat", &["a".into(), "b".into()]).unwrap()), "ab");
        assert_eq!(
            text(r.execute("concatws", &["a".into(), "b".into(), "c".into(), "@".into()]).unwrap()),
            "a@b@c"
        );
        assert_eq!(
            text(r.execute("concatWs", &["a".into(), Value::Int(1), "#".into()]).unwrap()),
            "a#1"
        );
    }

    #[test]
    fn test_contains_and_like() {
        let r = registry();
        assert_eq!(r.execute("contains", &["String".into(), "ing".into()]).unwrap(), Value::Boolean(true));
        assert!(r.execute("contains", &["String".into()]).is_err());
        assert_eq!(r.execute("like", &["results.txt".into(), "results.*".into()]).unwrap(), Value::Boolean(true));
        assert_eq!(r.execute("like", &["b.log".into(), "*.log".into()]).unwrap(), Value::Boolean(true));
        assert_eq!(r.execute("like", &["b.txt".into(), "*.log".into()]).unwrap(), Value::Boolean(false));
    }

    #[test]
    fn test_like_reuses_compiled_pattern() {
        let r = registry();
        let pattern = "^cached-[0-9]+\\.log$";
        for (name, expected) in [("cached-1.log", true), ("cached-x.log", false), ("cached-22.log", true)] {
            assert_eq!(
                r.execute("like", &[name.into(), pattern.into()]).unwrap(),
                Value::Boolean(expected)
            );
        }
        let cache = PATTERN_CACHE.get().unwrap().lock().unwrap();
        assert!(cache.contains_key(pattern));
    }

    #[test]
    fn test_cached_wildcard_fallback() {
        let first = cached_pattern("*.cache-md").unwrap();
        let second = cached_pattern("*.cache-md").unwrap();
        assert_eq!(first.as_str(), second.as_str());
        assert!(second.is_match("notes.cache-md"));
        assert!(!second.is_match("notes.cache-mdx"));
    }

    #[test]
    fn test_comparisons_coerce_numbers() {
        let r = registry();
        assert_eq!(r.execute("gt", &[Value::Int(4096), "2048".into()]).unwrap(), Value::Boolean(true));
        assert_eq!(r.execute("eq", &[Value::Float(3.0), "3".into()]).unwrap(), Value::Boolean(true));
        assert_eq!(r.execute("lt", &["a".into(), "b".into()]).unwrap(), Value::Boolean(true));
        assert_eq!(
            r.execute("or", &[Value::Boolean(false), Value::Boolean(true)]).unwrap(),
            Value::Boolean(true)
        );
        assert!(r.execute("and", &[Value::Boolean(true), "yes".into()]).is_err());
    }

    #[test]
    fn test_substr() {
        let r = registry();
        let s = || Value::string("abcdef");
        assert_eq!(text(r.execute("substr", &[s(), "2".into()]).unwrap()), "cdef");
        assert_eq!(text(r.execute("substr", &[s(), "2".into(), "4".into()]).unwrap()), "cde");
        assert_eq!(text(r.execute("substr", &[s(), "2".into(), "100".into()]).unwrap()), "cdef");
        assert_eq!(text(r.execute("substr", &[s(), "100".into(), "6".into()]).unwrap()), "abcdef");
        assert_eq!(text(r.execute("substr", &[s(), "6".into()]).unwrap()), "abcdef");
    }

    #[test]
    fn test_substr_failures() {
        let r = registry();
        let s = || Value::string("abcdef");
        assert!(r.execute("substr", &[s()]).is_err());
        for args in [
            vec![s(), "3".into(), "0".into()],
            vec![s(), "-3".into()],
            vec![s(), "0".into(), "-5".into()],
            vec![s(), Value::Int(-1)],
        ] {
            let err = r.execute("substr", &args).unwrap_err();
            assert!(matches!(err.root(), FunctionError::Range(_)), "{:?}", args);
        }
        for args in [
            vec![s(), "illegal".into()],
            vec![s(), "0".into(), "illegal".into()],
            vec![s(), Value::Boolean(true)],
        ] {
            let err = r.execute("substr", &args).unwrap_err();
            assert!(matches!(err.root(), FunctionError::IncorrectType { .. }), "{:?}", args);
        }
    }

    #[test]
    fn test_time_functions_use_clock() {
        let r = fixed(2022, 8, 22);
        assert_eq!(r.execute("day", &[]).unwrap(), Value::Int(22));
        assert_eq!(text(r.execute("date", &[]).unwrap()), "2022-August-22");
        assert_eq!(text(r.execute("mon", &[]).unwrap()), "August");
        assert_eq!(r.execute("yr", &[]).unwrap(), Value::Int(2022));

        let sunday = fixed(2022, 8, 28);
        assert_eq!(text(sunday.execute("dayOfWeek", &[]).unwrap()), "Sunday");
        assert_eq!(text(sunday.execute("dayofweek", &[]).unwrap()), "Sunday");
    }

    #[test]
    fn test_time_differences() {
        let r = fixed(2022, 8, 22);
        let now = r.execute("now", &[]).unwrap();
        assert_eq!(r.execute("daydiff", &[now.clone(), now.clone()]).unwrap(), Value::Float(0.0));
        assert_eq!(r.execute("hourdiff", &[now.clone(), now]).unwrap(), Value::Float(0.0));
        assert!(r.execute("daydiff", &["x".into(), "y".into()]).is_err());
    }

    #[test]
    fn test_cwd_and_identity() {
        let r = registry();
        let expected = std::env::current_dir().unwrap().to_string_lossy().into_owned();
        assert_eq!(text(r.execute("wd", &[]).unwrap()), expected);
        assert_eq!(r.execute("identity", &[Value::Float(3.0)]).unwrap(), Value::Float(3.0));
    }
}
