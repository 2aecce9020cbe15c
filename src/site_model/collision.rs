//! Detects save-path templates that can produce the same output file.
//!
//! A template is read as a pattern over paths: literal text matches itself and every
//! placeholder matches one or more characters (never `/`, except for dates).  Two templates
//! collide when some path matches both, which is decided by searching the product of the two
//! patterns.

use std::collections::HashSet;

use super::template::{Segment, Template};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum CharClass {
    Exact(char),
    NonSlash,
    Any,
}

impl CharClass {
    fn intersects(self, other: Self) -> bool {
        match (self, other) {
            (CharClass::Exact(a), CharClass::Exact(b)) => a == b,
            (CharClass::Exact(c), CharClass::NonSlash)
            | (CharClass::NonSlash, CharClass::Exact(c)) => c != '/',
            _ => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Atom {
    One(CharClass),
    /// Zero or more
    Many(CharClass),
}

impl Atom {
    fn class(self) -> CharClass {
        match self {
            Atom::One(class) | Atom::Many(class) => class,
        }
    }

    fn next(self, index: usize) -> usize {
        match self {
            Atom::One(_) => index + 1,
            Atom::Many(_) => index,
        }
    }
}

fn compile(template: &Template) -> Vec<Atom> {
    let mut atoms = Vec::new();
    for segment in template.segments() {
        match segment {
            Segment::Literal(text) => {
                atoms.extend(text.chars().map(|c| Atom::One(CharClass::Exact(c))));
            }
            Segment::Placeholder { placeholder, .. } => {
                let class = if placeholder.may_span_dirs() {
                    CharClass::Any
                } else {
                    CharClass::NonSlash
                };
                atoms.push(Atom::One(class));
                atoms.push(Atom::Many(class));
            }
        }
    }
    atoms
}

/// Whether some non-empty substitution of `a` equals some substitution of `b`.
pub(crate) fn overlaps(a: &Template, b: &Template) -> bool {
    let a = compile(a);
    let b = compile(b);

    let mut seen = HashSet::new();
    let mut pending = vec![(0, 0)];
    while let Some((i, j)) = pending.pop() {
        if !seen.insert((i, j)) {
            continue;
        }
        if i == a.len() && j == b.len() {
            return true;
        }

        if let Some(Atom::Many(_)) = a.get(i) {
            pending.push((i + 1, j));
        }
        if let Some(Atom::Many(_)) = b.get(j) {
            pending.push((i, j + 1));
        }
        if let (Some(&x), Some(&y)) = (a.get(i), b.get(j)) {
            if x.class().intersects(y.class()) {
                pending.push((x.next(i), y.next(j)));
            }
        }
    }
    false
}

#[cfg(test)]
mod test {
    use super::*;

    fn collide(a: &str, b: &str) -> bool {
        let a = Template::parse(a).unwrap();
        let b = Template::parse(b).unwrap();
        let forward = overlaps(&a, &b);
        assert_eq!(forward, overlaps(&b, &a), "overlap must be symmetric");
        forward
    }

    #[test]
    fn identical_slug_templates() {
        assert!(collide("{slug}.html", "{slug}.html"));
    }

    #[test]
    fn identical_fixed_paths() {
        assert!(collide("index.html", "index.html"));
        assert!(!collide("index.html", "archives.html"));
    }

    #[test]
    fn different_directories() {
        assert!(!collide("pages/{slug}.html", "{slug}.html"));
        assert!(!collide("category/{slug}.html", "tag/{slug}.html"));
    }

    #[test]
    fn slug_never_spans_directories() {
        assert!(!collide("{slug}.html", "category/{slug}.html"));
        assert!(!collide("feeds/{slug}.atom.xml", "feeds/author/{slug}.atom.xml"));
    }

    #[test]
    fn shifted_literals_still_collide() {
        // slug "a" on both sides gives "aa"
        assert!(collide("a{slug}", "{slug}a"));
    }

    #[test]
    fn different_extensions() {
        assert!(!collide("{slug}.html", "{slug}.htm"));
        assert!(!collide("feeds/{slug}.atom.xml", "feeds/{slug}.rss.xml"));
    }

    #[test]
    fn placeholder_is_never_empty() {
        assert!(!collide("pages/{slug}.html", "pages/.html"));
        assert!(collide("pages/{slug}.html", "pages/x.html"));
    }

    #[test]
    fn dates_span_directories() {
        assert!(collide("posts/{date:%Y}/index.html", "posts/{date:%Y/%m}/index.html"));
        // a date of "2020/index" fills the shorter template
        assert!(collide("posts/{date:%Y}/index.html", "posts/{date:%Y}.html"));
        assert!(!collide("posts/{date:%Y}/index.html", "archive/{date:%Y}.html"));
    }

    #[test]
    fn empty_templates() {
        assert!(collide("", ""));
        assert!(!collide("", "{slug}.html"));
    }
}
