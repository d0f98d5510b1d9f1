use super::*;

fn mark(name: &str, rank: Rank) -> Mark {
    Mark {
        name: name.to_owned(),
        rank,
        zone: "Zone".to_owned(),
        spawns: Vec::new(),
    }
}

fn labels(resolved: &[ResolvedMark<'_>]) -> Vec<(String, RankLabel)> {
    let mut out: Vec<_> = resolved
        .iter()
        .map(|r| (r.name.to_owned(), r.label))
        .collect();
    out.sort();
    out
}

#[test]
fn remap_is_independent_of_input_order() {
    let zeta = mark("Zeta", Rank::A);
    let alpha = mark("Alpha", Rank::A);
    let mid = mark("Mid", Rank::B);

    let expected = vec![
        ("Alpha".to_owned(), RankLabel::A1),
        ("Mid".to_owned(), RankLabel::B1),
        ("Zeta".to_owned(), RankLabel::A2),
    ];

    let a = remap_ranks(&[&zeta, &alpha, &mid]).unwrap();
    let b = remap_ranks(&[&mid, &alpha, &zeta]).unwrap();
    assert_eq!(labels(&a), expected);
    assert_eq!(labels(&b), expected);
}

#[test]
fn remap_preserves_input_order_and_leaves_s_ranks() {
    let s = mark("Big", Rank::S);
    let ss = mark("Bigger", Rank::SS);
    let b2 = mark("Yb", Rank::B);
    let b1 = mark("Xb", Rank::B);

    let out = remap_ranks(&[&s, &b2, &ss, &b1]).unwrap();
    let got: Vec<_> = out.iter().map(|r| (r.name, r.label)).collect();
    assert_eq!(
        got,
        vec![
            ("Big", RankLabel::S),
            ("Yb", RankLabel::B2),
            ("Bigger", RankLabel::SS),
            ("Xb", RankLabel::B1),
        ]
    );
}

#[test]
fn ordinal_sort_puts_uppercase_before_lowercase() {
    let lower = mark("alpha", Rank::A);
    let upper = mark("Zulu", Rank::A);
    let out = remap_ranks(&[&lower, &upper]).unwrap();
    assert_eq!(out[0].label, RankLabel::A2);
    assert_eq!(out[1].label, RankLabel::A1);
}

#[test]
fn too_many_a_ranks_fail() {
    let a = mark("a", Rank::A);
    let b = mark("b", Rank::A);
    let c = mark("c", Rank::A);
    assert!(matches!(
        remap_ranks(&[&a, &b, &c]),
        Err(HuntmapError::Input(_))
    ));
}

#[test]
fn duplicate_names_fail() {
    let a = mark("Twin", Rank::A);
    let b = mark("Twin", Rank::S);
    assert!(remap_ranks(&[&a, &b]).is_err());
}
