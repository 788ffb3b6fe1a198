//! Myers O(ND) difference algorithm over `char` slices.
//!
//! The entry point strips the common prefix and suffix, handles the cheap
//! shapes (one side empty, one side contained in the other) directly, and
//! falls back to a middle-snake bisection for the rest. The raw result is then
//! merged so every run between two equalities is one delete followed by one
//! insert.

use crate::patch::{Chunk, Patch};

// ── Public utilities ──────────────────────────────────────────────────────

/// Number of chars in the common prefix of `a` and `b`.
pub fn common_prefix(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Number of chars in the common suffix of `a` and `b`.
pub fn common_suffix(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Compute the diff that turns `src` into `dst`.
///
/// Equal runs are included, so [`crate::patch_src`] and [`crate::patch_dst`]
/// rebuild both inputs exactly.
pub fn diff(src: &str, dst: &str) -> Patch {
    let src: Vec<char> = src.chars().collect();
    let dst: Vec<char> = dst.chars().collect();
    merge(diff_chars(&src, &dst))
}

// ── Core algorithm ────────────────────────────────────────────────────────

fn diff_chars(src: &[char], dst: &[char]) -> Patch {
    if src == dst {
        return if src.is_empty() {
            Vec::new()
        } else {
            vec![Chunk::Equal(collect(src))]
        };
    }

    let prefix = prefix_len(src, dst);
    let (src_rest, dst_rest) = (&src[prefix..], &dst[prefix..]);
    let suffix = suffix_len(src_rest, dst_rest);
    let src_mid = &src_rest[..src_rest.len() - suffix];
    let dst_mid = &dst_rest[..dst_rest.len() - suffix];

    let mut patch = Vec::new();
    if prefix > 0 {
        patch.push(Chunk::Equal(collect(&src[..prefix])));
    }
    patch.extend(diff_middle(src_mid, dst_mid));
    if suffix > 0 {
        patch.push(Chunk::Equal(collect(&src[src.len() - suffix..])));
    }
    patch
}

/// Diff two slices that share no common prefix or suffix.
fn diff_middle(src: &[char], dst: &[char]) -> Patch {
    if src.is_empty() {
        return if dst.is_empty() {
            Vec::new()
        } else {
            vec![Chunk::Insert(collect(dst))]
        };
    }
    if dst.is_empty() {
        return vec![Chunk::Delete(collect(src))];
    }

    let src_longer = src.len() > dst.len();
    let (long, short) = if src_longer { (src, dst) } else { (dst, src) };
    if let Some(at) = find(long, short) {
        let edge = |chars: &[char]| {
            if src_longer {
                Chunk::Delete(collect(chars))
            } else {
                Chunk::Insert(collect(chars))
            }
        };
        return vec![
            edge(&long[..at]),
            Chunk::Equal(collect(short)),
            edge(&long[at + short.len()..]),
        ];
    }

    if short.len() == 1 {
        return replace(src, dst);
    }

    bisect(src, dst)
}

/// One search direction of the middle-snake bisection: the furthest `x`
/// reached on every diagonal `k = x - y`, plus the diagonals already known to
/// run off the edit graph.
struct Frontier {
    reach: Vec<isize>,
    offset: isize,
    low: isize,
    high: isize,
}

impl Frontier {
    fn new(max_d: isize) -> Self {
        let mut reach = vec![-1isize; (2 * max_d) as usize];
        reach[(max_d + 1) as usize] = 0;
        Self {
            reach,
            offset: max_d,
            low: 0,
            high: 0,
        }
    }

    fn diagonals(&self, d: isize) -> std::ops::RangeInclusive<isize> {
        (-d + self.low)..=(d - self.high)
    }

    fn reached(&self, k: isize) -> Option<isize> {
        let at = usize::try_from(self.offset + k).ok()?;
        self.reach.get(at).copied().filter(|&x| x != -1)
    }

    /// Step diagonal `k` to edit distance `d` and follow its snake while
    /// `same(x, y)` holds inside an `n` by `m` graph.
    fn extend(
        &mut self,
        d: isize,
        k: isize,
        n: isize,
        m: isize,
        same: impl Fn(usize, usize) -> bool,
    ) -> (isize, isize) {
        let at = (self.offset + k) as usize;
        let mut x = if k == -d || (k != d && self.reach[at - 1] < self.reach[at + 1]) {
            self.reach[at + 1]
        } else {
            self.reach[at - 1] + 1
        };
        let mut y = x - k;
        while x < n && y < m && same(x as usize, y as usize) {
            x += 1;
            y += 1;
        }
        self.reach[at] = x;

        if x > n {
            self.high += 2;
        } else if y > m {
            self.low += 2;
        }
        (x, y)
    }
}

/// Find the middle snake and split the problem in two there.
fn bisect(src: &[char], dst: &[char]) -> Patch {
    let n = src.len() as isize;
    let m = dst.len() as isize;
    let max_d = (n + m + 1) / 2;
    let delta = n - m;
    // With an odd delta the forward pass detects the overlap, otherwise the reverse pass does.
    let odd = delta % 2 != 0;

    let mut forward = Frontier::new(max_d);
    let mut reverse = Frontier::new(max_d);
    let inside = |x: isize, y: isize| x <= n && y <= m;

    for d in 0..max_d {
        let mut k = *forward.diagonals(d).start();
        while k <= *forward.diagonals(d).end() {
            let (x, y) = forward.extend(d, k, n, m, |x, y| src[x] == dst[y]);
            if odd && inside(x, y) {
                if let Some(back) = reverse.reached(delta - k).filter(|&back| back <= n) {
                    if x >= n - back {
                        return split(src, dst, x as usize, y as usize);
                    }
                }
            }
            k += 2;
        }

        let mut k = *reverse.diagonals(d).start();
        while k <= *reverse.diagonals(d).end() {
            let (back, back_y) = reverse.extend(d, k, n, m, |x, y| {
                src[src.len() - x - 1] == dst[dst.len() - y - 1]
            });
            if !odd && inside(back, back_y) {
                let fk = delta - k;
                if let Some(x) = forward.reached(fk).filter(|&x| x <= n) {
                    let y = x - fk;
                    if (0..=m).contains(&y) && x >= n - back {
                        return split(src, dst, x as usize, y as usize);
                    }
                }
            }
            k += 2;
        }
    }

    replace(src, dst)
}

fn split(src: &[char], dst: &[char], x: usize, y: usize) -> Patch {
    if (x == 0 && y == 0) || (x == src.len() && y == dst.len()) {
        return replace(src, dst);
    }
    let mut patch = diff_chars(&src[..x], &dst[..y]);
    patch.extend(diff_chars(&src[x..], &dst[y..]));
    patch
}

fn replace(src: &[char], dst: &[char]) -> Patch {
    vec![Chunk::Delete(collect(src)), Chunk::Insert(collect(dst))]
}

// ── Merge pass ────────────────────────────────────────────────────────────

/// Collapse every run between two equalities into one delete and one
/// insert, factoring out any text the two have in common at either end.
fn merge(patch: Patch) -> Patch {
    let mut out = Vec::with_capacity(patch.len());
    let mut deleted = String::new();
    let mut inserted = String::new();

    for chunk in patch {
        match chunk {
            Chunk::Delete(text) => deleted.push_str(&text),
            Chunk::Insert(text) => inserted.push_str(&text),
            Chunk::Equal(text) if text.is_empty() => {}
            Chunk::Equal(text) => {
                flush(&mut out, &mut deleted, &mut inserted);
                push_equal(&mut out, text);
            }
        }
    }
    flush(&mut out, &mut deleted, &mut inserted);
    out
}

fn flush(out: &mut Patch, deleted: &mut String, inserted: &mut String) {
    let mut del = std::mem::take(deleted);
    let mut ins = std::mem::take(inserted);
    let mut tail = String::new();

    if !del.is_empty() && !ins.is_empty() {
        let head = common_prefix(&del, &ins);
        if head > 0 {
            let rest_del = del.split_off(byte_at(&del, head));
            ins = ins.split_off(byte_at(&ins, head));
            push_equal(out, del);
            del = rest_del;
        }

        let back = common_suffix(&del, &ins);
        if back > 0 {
            let del_cut = byte_at(&del, del.chars().count() - back);
            let ins_cut = byte_at(&ins, ins.chars().count() - back);
            tail = del.split_off(del_cut);
            ins.truncate(ins_cut);
        }
    }

    if !del.is_empty() {
        out.push(Chunk::Delete(del));
    }
    if !ins.is_empty() {
        out.push(Chunk::Insert(ins));
    }
    push_equal(out, tail);
}

fn push_equal(out: &mut Patch, text: String) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(Chunk::Equal(last)) => last.push_str(&text),
        _ => out.push(Chunk::Equal(text)),
    }
}

// ── Slice helpers ─────────────────────────────────────────────────────────

fn prefix_len(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn suffix_len(a: &[char], b: &[char]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

fn find(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn byte_at(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(at, _)| at)
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::{patch_dst, patch_src};

    fn eq(s: &str) -> Chunk {
        Chunk::Equal(s.to_string())
    }
    fn ins(s: &str) -> Chunk {
        Chunk::Insert(s.to_string())
    }
    fn del(s: &str) -> Chunk {
        Chunk::Delete(s.to_string())
    }

    #[test]
    fn prefix_and_suffix() {
        assert_eq!(common_prefix("hello", "helloworld"), 5);
        assert_eq!(common_prefix("abc", "xyz"), 0);
        assert_eq!(common_suffix("hello", "jello"), 4);
        assert_eq!(common_suffix("", "abc"), 0);
    }

    #[test]
    fn equal_strings() {
        assert_eq!(diff("hello", "hello"), vec![eq("hello")]);
        assert!(diff("", "").is_empty());
    }

    #[test]
    fn one_side_empty() {
        assert_eq!(diff("", "hello"), vec![ins("hello")]);
        assert_eq!(diff("hello", ""), vec![del("hello")]);
    }

    #[test]
    fn single_insert_and_delete() {
        assert_eq!(diff("ac", "abc"), vec![eq("a"), ins("b"), eq("c")]);
        assert_eq!(diff("abc", "ac"), vec![eq("a"), del("b"), eq("c")]);
    }

    #[test]
    fn shorter_contained_in_longer() {
        assert_eq!(diff("xabcx", "abc"), vec![del("x"), eq("abc"), del("x")]);
        assert_eq!(diff("b", "abc"), vec![ins("a"), eq("b"), ins("c")]);
    }

    #[test]
    fn replacement_is_delete_then_insert() {
        assert_eq!(diff("fat", "chubby"), vec![del("fat"), ins("chubby")]);
        assert_eq!(
            diff("I'm feeling fat and sassy", "I'm feeling fat and sexy"),
            vec![eq("I'm feeling fat and s"), del("ass"), ins("ex"), eq("y")]
        );
    }

    #[test]
    fn bisected_diff_rebuilds_both_sides() {
        let src = "the quick brown fox";
        let dst = "the slow green fox";
        let patch = diff(src, dst);
        assert_eq!(patch_src(&patch), src);
        assert_eq!(patch_dst(&patch), dst);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(diff("héllo", "hállo"), vec![eq("h"), del("é"), ins("á"), eq("llo")]);
    }

    #[test]
    fn merge_factors_shared_ends() {
        let merged = merge(vec![del("abcx"), ins("abdx")]);
        assert_eq!(merged, vec![eq("ab"), del("c"), ins("d"), eq("x")]);
    }

    #[test]
    fn bisect_splits_for_odd_and_even_deltas() {
        for (src, dst) in [("abcdef", "azced"), ("abcd", "xbcy"), ("kitten", "sitting")] {
            let (a, b): (Vec<char>, Vec<char>) = (src.chars().collect(), dst.chars().collect());
            let patch = merge(bisect(&a, &b));
            assert_eq!(patch_src(&patch), src);
            assert_eq!(patch_dst(&patch), dst);
        }
        let (a, b): (Vec<char>, Vec<char>) = ("abcd".chars().collect(), "xbcy".chars().collect());
        assert_eq!(merge(bisect(&a, &b)), vec![del("a"), ins("x"), eq("bc"), del("d"), ins("y")]);
    }
}
