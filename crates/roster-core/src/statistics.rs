//! Grade statistics and ranking.

use std::cmp::Ordering;

use crate::model::{Course, Student};

/// Arithmetic mean of the grades of `courses`, `None` when there are none.
pub fn mean_grade<'a, I>(courses: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Course>,
{
    let (sum, n) = courses
        .into_iter()
        .fold((0i64, 0u64), |(sum, n), c| (sum + c.grade as i64, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum as f64 / n as f64)
    }
}

/// Order two students for ranking: higher mean grade first.
///
/// Students without any course rank after everyone who has one. Equal keys
/// compare as `Equal` so a stable sort keeps roster order among them.
pub fn rank_order(a: &Student, b: &Student) -> Ordering {
    match (a.mean_grade(), b.mean_grade()) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Rank students by descending mean grade and keep the first `count`.
pub fn rank_students<'a, I>(students: I, count: usize) -> Vec<&'a Student>
where
    I: IntoIterator<Item = &'a Student>,
{
    if count == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<&Student> = students.into_iter().collect();
    ranked.sort_by(|a, b| rank_order(a, b));
    ranked.truncate(count);
    ranked
}
