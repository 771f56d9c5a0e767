use std::fmt;

use crate::error;

pub type Res<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub fn next_value<T>(it: &mut std::iter::Peekable<std::slice::Iter<'_, String>>, opt: &str) -> T
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let n = it
        .next()
        .unwrap_or_else(|| error_exit(format!("{}: value missing", opt)));
    n.parse()
        .unwrap_or_else(|e| error_exit(format!("{}: {} '{}'", opt, e, n)))
}

// 次のオプション("-"で始まる引数)までの値をすべて取得
pub fn next_values(it: &mut std::iter::Peekable<std::slice::Iter<'_, String>>) -> Vec<String> {
    let mut res = vec![];
    while let Some(s) = it.next_if(|s| !s.starts_with('-')) {
        // "234p 234p 11p" のように1つの引数に空白区切りで渡された場合も可
        res.extend(s.split_whitespace().map(|s| s.to_string()));
    }
    res
}

pub fn error_exit<T: fmt::Display, U>(t: T) -> U {
    error!("{}", t);
    std::process::exit(1);
}

pub fn vec_count<T: PartialEq>(v: &[T], e: &T) -> usize {
    v.iter().filter(|&n| n == e).count()
}

pub fn vec_to_string<T: fmt::Display>(v: &[T]) -> String {
    let vs: Vec<String> = v.iter().map(|x| format!("{}", x)).collect();
    "[".to_string() + &vs.join(", ") + "]"
}

#[test]
fn test_next_values() {
    let args: Vec<String> = ["234p 234p", "11p", "-w", "1p"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mut it = args.iter().peekable();
    assert_eq!(next_values(&mut it), vec!["234p", "234p", "11p"]);
    assert_eq!(it.next().map(|s| s.as_str()), Some("-w"));
    let wt: String = next_value(&mut it, "-w");
    assert_eq!(wt, "1p");
}

#[test]
fn test_vec_to_string() {
    assert_eq!(vec_to_string(&[1, 2, 3]), "[1, 2, 3]");
    assert_eq!(vec_count(&[0, 1, 0], &0), 2);
}
