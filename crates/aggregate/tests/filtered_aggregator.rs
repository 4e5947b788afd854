//! Integration tests for filtered aggregation over an in-memory segment.

use sieve_aggregate::{
    Aggregator, AggregatorFactory, AggregatorSpec, FilteredAggregator, FilteredAggregatorFactory,
};
use sieve_core::{ColumnType, Error, InMemorySegment};
use sieve_filter::Predicate;

const VALUES: [f32; 3] = [0.15, 0.27, 0.14];

/// Single-valued "dim" cycling a, a, b with float "value" column.
fn segment() -> InMemorySegment {
    let dims: Vec<Vec<&str>> = (0..VALUES.len())
        .map(|i| if i % 3 == 2 { vec!["b"] } else { vec!["a"] })
        .collect();
    InMemorySegment::builder()
        .add_dimension("dim", dims)
        .unwrap()
        .add_float_column("value", VALUES.to_vec())
        .unwrap()
        .add_long_column("hits", vec![10, 20, 30])
        .unwrap()
        .build()
}

fn filtered_sum(filter: Predicate, segment: &InMemorySegment) -> FilteredAggregator {
    let factory =
        FilteredAggregatorFactory::new(AggregatorSpec::double_sum("billy", "value"), filter);
    let agg = factory.bind(segment).unwrap();
    assert_eq!(agg.name(), "billy");
    agg
}

fn value(i: usize) -> f64 {
    f64::from(VALUES[i])
}

/// Advances the aggregator then the cursor, checking `get` is stable around each step.
fn assert_values(agg: &mut FilteredAggregator, segment: &mut InMemorySegment, expected: &[f64]) {
    for _ in 0..3 {
        assert_eq!(agg.get(), 0.0);
    }
    for &expected in expected {
        agg.advance(&*segment).unwrap();
        segment.advance();
        for _ in 0..3 {
            assert_eq!(agg.get(), expected);
        }
    }
}

#[test]
fn selector_filter() {
    let mut segment = segment();
    let mut agg = filtered_sum(Predicate::selector("dim", "a"), &segment);

    let first = value(0);
    let second = first + value(1);
    assert_values(&mut agg, &mut segment, &[first, second, second]);
}

#[test]
fn not_filter() {
    let mut segment = segment();
    let mut agg = filtered_sum(Predicate::not(Predicate::selector("dim", "b")), &segment);

    let first = value(0);
    let second = first + value(1);
    assert_values(&mut agg, &mut segment, &[first, second, second]);
}

#[test]
fn or_filter() {
    let mut segment = segment();
    let mut agg = filtered_sum(
        Predicate::or(vec![
            Predicate::selector("dim", "a"),
            Predicate::selector("dim", "b"),
        ]),
        &segment,
    );

    let first = value(0);
    let second = first + value(1);
    let third = second + value(2);
    assert_values(&mut agg, &mut segment, &[first, second, third]);
}

#[test]
fn and_filter() {
    let mut segment = segment();
    let mut agg = filtered_sum(
        Predicate::and(vec![
            Predicate::not(Predicate::selector("dim", "b")),
            Predicate::selector("dim", "a"),
        ]),
        &segment,
    );

    let first = value(0);
    let second = first + value(1);
    assert_values(&mut agg, &mut segment, &[first, second, second]);
}

#[test]
fn running_sums_match_expected_decimals() {
    let mut segment = segment();
    let mut agg = filtered_sum(Predicate::selector("dim", "a"), &segment);
    let mut sums = Vec::new();
    while !segment.is_done() {
        agg.advance(&segment).unwrap();
        sums.push(agg.get());
        segment.advance();
    }
    let expected = [0.15, 0.42, 0.42];
    for (sum, expected) in sums.iter().zip(expected) {
        assert!((sum - expected).abs() < 1e-6, "{} vs {}", sum, expected);
    }
}

#[test]
fn factorize_reads_no_rows() {
    let segment = segment();
    let factory = FilteredAggregatorFactory::new(
        AggregatorSpec::double_sum("billy", "value"),
        Predicate::selector("dim", "a"),
    );
    let agg = factory.factorize(&segment).unwrap();
    assert_eq!(agg.name(), "billy");
    assert_eq!(agg.get(), 0.0);
    assert_eq!(segment.position(), 0);
}

#[test]
fn missing_value_excludes_every_row() {
    let mut segment = segment();
    let mut agg = filtered_sum(Predicate::selector("dim", "not-in-segment"), &segment);
    assert!(agg.matcher().is_never());
    assert_values(&mut agg, &mut segment, &[0.0, 0.0, 0.0]);
}

#[test]
fn multi_valued_rows_match_any_value() {
    let mut segment = InMemorySegment::builder()
        .add_dimension("tags", vec![vec!["x", "y"], vec!["y"], vec!["z"], vec![]])
        .unwrap()
        .add_long_column("hits", vec![1, 2, 4, 8])
        .unwrap()
        .build();
    let factory = FilteredAggregatorFactory::new(
        AggregatorSpec::long_sum("hits", "hits"),
        Predicate::selector("tags", "y"),
    );
    let mut agg = factory.bind(&segment).unwrap();

    while !segment.is_done() {
        agg.advance(&segment).unwrap();
        segment.advance();
    }
    assert_eq!(agg.get_long(), 3);

    // NOT on a multi-valued row: excluded if any value matches.
    segment.reset();
    let factory = FilteredAggregatorFactory::new(
        AggregatorSpec::long_sum("hits", "hits"),
        Predicate::not(Predicate::selector("tags", "x")),
    );
    let mut agg = factory.bind(&segment).unwrap();
    while !segment.is_done() {
        agg.advance(&segment).unwrap();
        segment.advance();
    }
    assert_eq!(agg.get_long(), 14);
}

#[test]
fn aggregators_advance_in_lockstep() {
    let mut segment = segment();
    let specs = vec![
        AggregatorSpec::count("rows"),
        AggregatorSpec::filtered(AggregatorSpec::count("a_rows"), Predicate::selector("dim", "a")),
        AggregatorSpec::filtered(
            AggregatorSpec::long_sum("b_hits", "hits"),
            Predicate::selector("dim", "b"),
        ),
        AggregatorSpec::filtered(
            AggregatorSpec::double_max("a_max", "value"),
            Predicate::selector("dim", "a"),
        ),
    ];
    let mut aggs: Vec<Box<dyn Aggregator>> = specs
        .iter()
        .map(|spec| spec.factorize(&segment).unwrap())
        .collect();

    while !segment.is_done() {
        for agg in aggs.iter_mut() {
            agg.advance(&segment).unwrap();
        }
        segment.advance();
    }

    let results: Vec<(&str, f64)> = aggs.iter().map(|a| (a.name(), a.get())).collect();
    assert_eq!(
        results,
        vec![
            ("rows", 3.0),
            ("a_rows", 2.0),
            ("b_hits", 30.0),
            ("a_max", value(1)),
        ]
    );
}

#[test]
fn nested_filters_intersect() {
    let mut segment = InMemorySegment::builder()
        .add_dimension("country", vec![vec!["nz"], vec!["nz"], vec!["au"], vec!["nz"]])
        .unwrap()
        .add_dimension("device", vec![vec!["ios"], vec!["web"], vec!["ios"], vec!["ios"]])
        .unwrap()
        .add_long_column("hits", vec![1, 2, 4, 8])
        .unwrap()
        .build();
    let inner = AggregatorSpec::filtered(
        AggregatorSpec::long_sum("hits", "hits"),
        Predicate::selector("device", "ios"),
    );
    let outer = AggregatorSpec::filtered(inner, Predicate::selector("country", "nz"));
    assert_eq!(outer.name(), "hits");
    assert_eq!(
        outer.required_columns(),
        vec!["hits".to_string(), "device".to_string(), "country".to_string()]
    );

    let mut agg = outer.factorize(&segment).unwrap();
    while !segment.is_done() {
        agg.advance(&segment).unwrap();
        segment.advance();
    }
    assert_eq!(agg.get_long(), 9);
}

#[test]
fn delegate_errors_propagate_only_for_matching_rows() {
    let mut segment = segment();
    // Summing a long column as floats fails when the delegate is invoked.
    let factory = FilteredAggregatorFactory::new(
        AggregatorSpec::double_sum("bad", "hits"),
        Predicate::selector("dim", "b"),
    );
    let mut agg = factory.bind(&segment).unwrap();

    agg.advance(&segment).unwrap();
    segment.advance();
    agg.advance(&segment).unwrap();
    segment.advance();
    assert_eq!(
        agg.advance(&segment),
        Err(Error::type_mismatch("hits", ColumnType::Float, ColumnType::Long))
    );
    assert_eq!(agg.get(), 0.0);
}

#[test]
fn partial_results_combine() {
    let factory = FilteredAggregatorFactory::new(
        AggregatorSpec::double_sum("billy", "value"),
        Predicate::selector("dim", "a"),
    );

    let mut partials = Vec::new();
    for _ in 0..2 {
        let mut segment = segment();
        let mut agg = factory.bind(&segment).unwrap();
        while !segment.is_done() {
            agg.advance(&segment).unwrap();
            segment.advance();
        }
        partials.push(agg.get());
    }

    let combined = factory.combine(partials[0], partials[1]);
    assert_eq!(combined, 2.0 * (value(0) + value(1)));
}
