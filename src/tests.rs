use crate::{
    cost_model::FnCost,
    generate::{generate_pair, random_sequence, ErrorModel, GenerateOptions},
    matrix::cost_only,
    prelude::*,
    traceback::{apply, reconstruct},
    *,
};
use itertools::Itertools;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn test_sequences() -> impl Iterator<Item = (Sequence, Sequence)> {
    let ns = [0usize, 1, 2, 3, 5, 8, 13, 20, 50, 100];
    let es = [0.0f32, 0.05, 0.2, 0.5, 1.0];
    let models = [ErrorModel::Uniform, ErrorModel::Gap];
    let seeds = [1u64, 31415];
    ns.into_iter()
        .cartesian_product(es)
        .cartesian_product(models)
        .cartesian_product(seeds)
        .map(|(((length, error_rate), error_model), seed)| {
            let opt = GenerateOptions {
                length,
                error_rate,
                error_model,
            };
            generate_pair(&opt, &mut ChaCha8Rng::seed_from_u64(seed))
        })
}

fn cost_models() -> Vec<LinearCost> {
    vec![
        LinearCost::default(),
        LinearCost::unit(),
        LinearCost::linear(3, 2),
        LinearCost::linear_asymmetric(2, 1, 3),
        LinearCost::default().with_window(3),
    ]
}

/// Sum the per-column costs of an alignment under `cm`.
fn column_cost<T, C: CostModel<T>>(alignment: &Alignment<T>, cm: &C) -> Cost {
    let (mut i, mut j) = (0, 0);
    alignment
        .columns()
        .map(|col| match col {
            (Some(x), Some(y)) => {
                i += 1;
                j += 1;
                cm.sub_cost(x, y, i, j)
            }
            (Some(_), None) => {
                i += 1;
                cm.del_cost()
            }
            (None, Some(_)) => {
                j += 1;
                cm.ins_cost()
            }
            (None, None) => panic!("Column with two gaps"),
        })
        .sum()
}

#[test]
fn fixtures() {
    let cm = LinearCost::default();
    for (a, b, cost) in [
        ("kitten", "sitting", 5),
        ("intention", "execution", 8),
        ("earth", "pearl", 4),
        ("pearl", "earth", 4),
        ("BBADCBA", "BAADDCABDDA", 6),
        ("abc", "xyzabc", 3),
        ("ACGT", "TGCA", 6),
        ("banana", "ananas", 2),
        ("", "", 0),
    ] {
        assert_eq!(distance(a.as_bytes(), b.as_bytes()), cost, "{a} {b}");
        assert_eq!(NW::new(cm).cost(a.as_bytes(), b.as_bytes()).unwrap(), cost);
    }
    assert_eq!(
        compute_distance(b"kitten", b"sitting", &LinearCost::unit()).unwrap(),
        3
    );
}

#[test]
fn windowed_fixtures() {
    for (a, b, w, cost) in [
        ("earth", "pearl", 2, 4),
        ("earth", "pearl", 1, 10),
        ("abc", "xyzabc", 2, 9),
        ("banana", "ananas", 1, 12),
    ] {
        let cm = LinearCost::default().with_window(w);
        assert_eq!(
            compute_distance(a.as_bytes(), b.as_bytes(), &cm).unwrap(),
            cost,
            "{a} {b} {w}"
        );
    }
}

#[test]
fn alignment_fixtures() {
    let cm = LinearCost::default();
    for (a, b, ra, rb) in [
        ("BBADCBA", "BAADDCABDDA", "BBA-DC-B--A", "BAADDCABDDA"),
        ("kitten", "sitting", "kitten-", "sitting"),
        ("intention", "execution", "inte-ntion", "-execution"),
        ("earth", "pearl", "-earth", "pear-l"),
        ("pearl", "earth", "pear-l", "-earth"),
        ("ACGT", "TGCA", "-ACGT", "TGC-A"),
    ] {
        let alignment = compute_alignment(a.as_bytes(), b.as_bytes(), &cm).unwrap();
        assert_eq!(alignment.rows(), (ra.to_string(), rb.to_string()), "{a} {b}");
    }

    let cm = cm.with_window(1);
    let alignment = compute_alignment(b"earth", b"pearl", &cm).unwrap();
    assert_eq!(alignment.cost, 10);
    assert_eq!(alignment.rows(), ("earth".to_string(), "pearl".to_string()));
}

#[test]
fn alignment_path() {
    let cm = LinearCost::default();
    let (a, b) = (b"BBADCBA", b"BAADDCABDDA");
    let m = CostMatrix::build(a, b, &cm).unwrap();
    assert_eq!(m.row(7), &[7, 6, 5, 4, 5, 6, 5, 4, 5, 6, 7, 6]);
    assert_eq!(m.row(2), &[2, 1, 2, 3, 4, 5, 6, 7, 6, 7, 8, 9]);
    let path = reconstruct(&m, a, b, &cm).unwrap().path();
    assert_eq!(
        path,
        vec![
            Pos(0, 0),
            Pos(1, 1),
            Pos(2, 2),
            Pos(3, 3),
            Pos(3, 4),
            Pos(4, 5),
            Pos(5, 6),
            Pos(5, 7),
            Pos(6, 8),
            Pos(6, 9),
            Pos(6, 10),
            Pos(7, 11),
        ]
    );
}

#[test]
fn symmetric_models_are_symmetric() {
    for (a, b) in test_sequences() {
        for cm in cost_models().into_iter().filter(|cm| cm.is_symmetric()) {
            assert_eq!(
                compute_distance(&a, &b, &cm).unwrap(),
                compute_distance(&b, &a, &cm).unwrap(),
                "{} {}",
                to_string(&a),
                to_string(&b)
            );
        }
    }
}

#[test]
fn asymmetric_model_both_orders() {
    let cm = LinearCost::linear_asymmetric(2, 2, 3);
    assert_eq!(compute_distance(b"kitten", b"sitting", &cm).unwrap(), 6);
    assert_eq!(compute_distance(b"sitting", b"kitten", &cm).unwrap(), 7);
    // Swapping the sequences and the indel costs gives the same distance.
    let swapped = LinearCost::linear_asymmetric(2, 3, 2);
    for (a, b) in test_sequences() {
        assert_eq!(
            compute_distance(&a, &b, &cm).unwrap(),
            compute_distance(&b, &a, &swapped).unwrap()
        );
    }
}

#[test]
fn identity_and_empty() {
    let rng = &mut ChaCha8Rng::seed_from_u64(7);
    for cm in cost_models() {
        for n in [0, 1, 10, 100] {
            let a = random_sequence(n, rng);
            assert_eq!(compute_distance(&a, &a, &cm).unwrap(), 0);
            assert_eq!(compute_distance(b"", &a, &cm).unwrap(), n as Cost * cm.ins);
            assert_eq!(compute_distance(&a, b"", &cm).unwrap(), n as Cost * cm.del);
        }
    }
}

#[test]
fn triangle_inequality() {
    let opt = GenerateOptions {
        length: 30,
        error_rate: 0.3,
        error_model: ErrorModel::Uniform,
    };
    let rng = &mut ChaCha8Rng::seed_from_u64(2718);
    for _ in 0..50 {
        let (a, b) = generate_pair(&opt, rng);
        let (_, c) = generate_pair(&opt, rng);
        assert!(distance(&a, &c) <= distance(&a, &b) + distance(&b, &c));
    }
}

#[test]
fn edit_script_transforms_source_into_target() {
    for (a, b) in test_sequences() {
        for cm in cost_models() {
            let script = compute_edit_script(&a, &b, &cm).unwrap();
            assert!(script.len() <= a.len() + b.len());
            assert_eq!(apply(&a, &script), Some(b.clone()));
        }
    }
}

#[test]
fn alignment_is_consistent() {
    for (a, b) in test_sequences() {
        for cm in cost_models() {
            let (m, trace) = NW::new(cm).trace(&a, &b).unwrap();
            let alignment = trace.alignment(&a, &b);
            assert_eq!(alignment.source.len(), alignment.target.len());
            assert_eq!(alignment.ungapped_source(), a);
            assert_eq!(alignment.ungapped_target(), b);
            assert_eq!(column_cost(&alignment, &cm), m.cost());

            let path = trace.path();
            assert_eq!(path.first(), Some(&Pos(0, 0)));
            assert_eq!(path.last(), Some(&m.end()));
            for (p, q) in path.iter().tuple_windows() {
                assert!(q.0 - p.0 <= 1 && q.1 - p.1 <= 1 && q != p);
            }

            let cigar = trace.cigar();
            assert_eq!(cigar.to_path(), path);
            assert_eq!(cigar.verify(&cm, &a, &b), Some(m.cost()));
            assert_eq!(cigar.len(), trace.steps.len());

            assert_eq!(cost_only(&a, &b, &cm).unwrap(), m.cost());
        }
    }
}

#[test]
fn lazy_traceback_matches_reconstruct() {
    let cm = LinearCost::default();
    let (a, b) = (b"kitten", b"sitting");
    let m = CostMatrix::build(a, b, &cm).unwrap();
    let mut tb = Traceback::new(&m, a, b, &cm).unwrap();
    let first = tb.next().unwrap().unwrap();
    assert_eq!(first.pos, Pos(6, 7));
    assert_eq!(first.dir, Direction::Left);
    assert_eq!(first.edit_op(a, b), EditOp::Insert(b'g'));
    let rest = tb.collect::<Result<Vec<_>>>().unwrap();
    assert_eq!(rest.len(), 6);
    assert_eq!(rest.last().map(|s| s.parent()), Some(Pos(0, 0)));
}

#[test]
fn generic_symbols() {
    let cm = LinearCost::unit();
    let a = "the quick brown fox".split(' ').collect_vec();
    let b = "the slow brown dog".split(' ').collect_vec();
    assert_eq!(compute_distance(&a, &b, &cm).unwrap(), 2);

    let a = "earth".chars().collect_vec();
    let b = "pearl".chars().collect_vec();
    let alignment = align(&a, &b);
    assert_eq!(alignment.rows(), ("-earth".to_string(), "pear-l".to_string()));
}

#[test]
fn case_insensitive_model() {
    let cm = FnCost::new(
        |a: &u8, b: &u8, _: I, _: I| if a.eq_ignore_ascii_case(b) { 0 } else { 2 },
        1,
        1,
    );
    assert_eq!(compute_distance(b"Kitten", b"kITTEN", &cm).unwrap(), 0);
    assert_eq!(compute_distance(b"kitten", b"SITTING", &cm).unwrap(), 5);
    let script = compute_edit_script(b"aB", b"Ab", &cm).unwrap();
    assert_eq!(
        script,
        vec![EditOp::Match(b'a', b'A'), EditOp::Match(b'B', b'b')]
    );
}

#[test]
fn byte_display() {
    for c in 0..=u8::MAX {
        assert_eq!(byte_char(c).to_string(), to_string(&[c]));
    }
    let alignment = align("née".as_bytes(), b"nee");
    assert_eq!(alignment.cost, 3);
    let (source, target) = alignment.rows();
    assert_eq!(source.chars().filter(|&c| c == '\u{FFFD}').count(), 2);
    assert!(!source.contains('Ã') && !target.contains('Ã'));
}
