use rand::{rngs::StdRng, Rng, SeedableRng};
use reportmate_backend::domain::{AreaLevel, StudentId, Template};
use reportmate_backend::generator::{
    generate_comment, generate_comment_lines, key_hash, reduce_seed, select_index, GenerateOptions,
};

fn tpl(id: &str, area: &str, level: &str, sentence: &str) -> Template {
    Template { id: id.into(), area_id: area.into(), level: level.into(), sentence: sentence.into() }
}

fn random_key(rng: &mut StdRng) -> String {
    let len = rng.gen_range(0..24);
    (0..len)
        .map(|_| match rng.gen_range(0..3) {
            0 => rng.gen_range('a'..='z'),
            1 => rng.gen_range('가'..='힣'),
            _ => '.',
        })
        .collect()
}

#[test]
fn index_always_in_bounds() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..5_000 {
        let key = random_key(&mut rng);
        let count = rng.gen_range(1..50usize);
        let regen = rng.gen::<u32>();
        let idx = select_index(&key, regen, count).expect("non-empty candidates");
        assert!(idx < count, "{key:?} regen={regen} count={count} -> {idx}");
    }
}

#[test]
fn reduce_handles_extreme_seeds() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..5_000 {
        let seed = rng.gen_range(i64::from(i32::MIN)..=i64::from(i32::MAX) + i64::from(u32::MAX));
        let count = rng.gen_range(1..1_000usize);
        let idx = reduce_seed(seed, count);
        assert!(idx < count);
        assert_eq!(idx as i64, seed.rem_euclid(count as i64));
    }
}

#[test]
fn zero_candidates_never_select() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..100 {
        let key = random_key(&mut rng);
        assert_eq!(select_index(&key, rng.gen(), 0), None);
    }
}

#[test]
fn hash_is_stable_across_calls() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..1_000 {
        let key = random_key(&mut rng);
        assert_eq!(key_hash(&key), key_hash(&key));
    }
}

#[test]
fn comment_is_deterministic_and_order_preserving() {
    let pool = vec![
        tpl("t3", "a3", "1", "셋째."),
        tpl("t1a", "a1", "2", "첫째 가."),
        tpl("t2", "a2", "1", "둘째."),
        tpl("t1b", "a1", "2", "첫째 나."),
    ];
    let levels = [AreaLevel::new("a1", "2"), AreaLevel::new("a2", "1"), AreaLevel::new("a3", "1")];
    let opts = GenerateOptions::new(StudentId::Number(12)).with_regenerate_count(4);

    let first = generate_comment(&levels, &pool, &opts);
    for _ in 0..10 {
        assert_eq!(generate_comment(&levels, &pool, &opts), first);
    }

    let lines: Vec<&str> = first.split('\n').collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("첫째"));
    assert_eq!(lines[1], "둘째.");
    assert_eq!(lines[2], "셋째.");

    let reversed: Vec<AreaLevel> = levels.iter().rev().cloned().collect();
    let back = generate_comment(&reversed, &pool, &opts);
    let back_lines: Vec<&str> = back.split('\n').collect();
    assert_eq!(back_lines, lines.iter().rev().copied().collect::<Vec<_>>());
}

#[test]
fn unrelated_templates_do_not_shift_selection() {
    let base = vec![tpl("t1", "a1", "2", "A."), tpl("t2", "a1", "2", "B."), tpl("t3", "a1", "2", "C.")];
    let mut noisy = vec![tpl("x1", "a9", "2", "X."), tpl("x2", "a1", "1", "Y.")];
    noisy.extend(base.iter().cloned());
    noisy.push(tpl("x3", "a2", "2", "Z."));

    let levels = [AreaLevel::new("a1", "2")];
    for regen in 0..20 {
        let opts = GenerateOptions::new("student-42").with_regenerate_count(regen);
        assert_eq!(generate_comment(&levels, &base, &opts), generate_comment(&levels, &noisy, &opts));
    }
}

#[test]
fn regenerate_cycles_through_every_candidate() {
    let pool: Vec<Template> = (0..5).map(|i| tpl(&format!("t{i}"), "a1", "3", &format!("문장 {i}."))).collect();
    let levels = [AreaLevel::new("a1", "3")];
    let mut seen: Vec<String> = (0..5)
        .map(|regen| {
            let opts = GenerateOptions::new("s1").with_regenerate_count(regen);
            generate_comment_lines(&levels, &pool, &opts)[0].template_id.clone()
        })
        .collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 5);
}

#[test]
fn text_and_numeric_ids_with_same_rendering_agree() {
    let pool = vec![tpl("t1", "a1", "2", "A."), tpl("t2", "a1", "2", "B."), tpl("t3", "a1", "2", "C.")];
    let levels = [AreaLevel::new("a1", "2")];
    let as_number = GenerateOptions::new(StudentId::Number(1));
    let as_text = GenerateOptions::new("1");
    assert_eq!(generate_comment(&levels, &pool, &as_number), generate_comment(&levels, &pool, &as_text));
}
