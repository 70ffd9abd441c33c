//! Built-in demo classroom so the service is useful without external config.

use crate::domain::{Area, Rating, Student, StudentId, Template};

fn area(id: &str, subject: &str, name: &str, order_index: i32) -> Area {
  Area { id: id.into(), subject: subject.into(), name: name.into(), order_index, semester: Some(1) }
}

fn tpl(id: &str, area_id: &str, level: &str, sentence: &str) -> Template {
  Template { id: id.into(), area_id: area_id.into(), level: level.into(), sentence: sentence.into() }
}

fn rating(student: &str, area_id: &str, level: &str) -> Rating {
  Rating { student_id: StudentId::from(student), area_id: area_id.into(), level: level.into() }
}

pub fn seed_areas() -> Vec<Area> {
  vec![
    area("kor-1", "국어", "1. 시를 즐겨요", 1),
    area("kor-2", "국어", "2. 자신있게 말해요", 2),
    area("kor-3", "국어", "3. 마음을 나누어요", 3),
    area("math-1", "수학", "1. 9까지의 수", 1),
    area("math-2", "수학", "2. 여러 가지 모양", 2),
  ]
}

pub fn seed_students() -> Vec<Student> {
  vec![
    Student { id: "seed-s1".into(), number: 1, name: "김하늘".into() },
    Student { id: "seed-s2".into(), number: 2, name: "이바다".into() },
    Student { id: "seed-s3".into(), number: 3, name: "박구름".into() },
  ]
}

/// Deliberately incomplete: `seed-s3` has no 국어 2 rating.
pub fn seed_ratings() -> Vec<Rating> {
  vec![
    rating("seed-s1", "kor-1", "1"),
    rating("seed-s1", "kor-2", "1"),
    rating("seed-s1", "kor-3", "2"),
    rating("seed-s2", "kor-1", "2"),
    rating("seed-s2", "kor-2", "3"),
    rating("seed-s2", "kor-3", "2"),
    rating("seed-s3", "kor-1", "3"),
    rating("seed-s3", "kor-3", "1"),
    rating("seed-s1", "math-1", "1"),
    rating("seed-s2", "math-1", "2"),
    rating("seed-s3", "math-2", "3"),
  ]
}

/// Sentences per (area, level). Coverage is incomplete on purpose (math-2 has
/// only level 1 and 3).
pub fn seed_templates() -> Vec<Template> {
  vec![
    tpl("t-kor-1-1a", "kor-1", "1", "시의 분위기를 살려 실감 나게 낭송함."),
    tpl("t-kor-1-1b", "kor-1", "1", "시에 나타난 감각적 표현을 찾아 자신의 경험과 연결함."),
    tpl("t-kor-1-2a", "kor-1", "2", "시를 소리 내어 읽고 재미있는 부분을 말할 수 있음."),
    tpl("t-kor-1-2b", "kor-1", "2", "시를 읽고 떠오르는 장면을 그림으로 나타냄."),
    tpl("t-kor-1-3a", "kor-1", "3", "짧은 시를 따라 읽으며 시와 친해지고 있음."),
    tpl("t-kor-2-1a", "kor-2", "1", "듣는 사람을 바라보며 또박또박 자신있게 말함."),
    tpl("t-kor-2-2a", "kor-2", "2", "자신의 생각을 바른 자세로 말하려고 노력함."),
    tpl("t-kor-2-3a", "kor-2", "3", "친구들 앞에서 말하는 연습이 더 필요함."),
    tpl("t-kor-2-3b", "kor-2", "3", "작은 목소리로라도 자신의 생각을 표현하기 시작함."),
    tpl("t-kor-3-1a", "kor-3", "1", "인물의 마음을 짐작하여 알맞은 말로 위로함."),
    tpl("t-kor-3-2a", "kor-3", "2", "친구의 마음을 생각하며 고운 말을 사용함."),
    tpl("t-kor-3-2b", "kor-3", "2", "겪은 일을 떠올려 자신의 마음을 글로 표현함."),
    tpl("t-kor-3-3a", "kor-3", "3", "자신의 마음을 표현하는 낱말을 익히고 있음."),
    tpl("t-math-1-1a", "math-1", "1", "9까지의 수를 세고 크기를 정확히 비교함."),
    tpl("t-math-1-2a", "math-1", "2", "9까지의 수를 바르게 읽고 쓸 수 있음."),
    tpl("t-math-2-1a", "math-2", "1", "여러 가지 모양을 찾아 특징을 설명함."),
    tpl("t-math-2-3a", "math-2", "3", "같은 모양끼리 모으는 활동에 즐겁게 참여함."),
  ]
}
