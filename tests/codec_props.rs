use proptest::prelude::*;
use refold::capture::dedup_ranges;
use refold::codec;
use refold::model::{FoldRange, Point, RecordId};

const PROPTEST_CASES: u32 = 256;

fn arb_point() -> impl Strategy<Value = Point> {
    (any::<u32>(), any::<u32>()).prop_map(|(row, column)| Point::new(row, column))
}

fn arb_range() -> impl Strategy<Value = FoldRange> {
    (arb_point(), arb_point()).prop_map(|(a, b)| {
        if a <= b {
            FoldRange::new(a, b)
        } else {
            FoldRange::new(b, a)
        }
    })
}

/// Ranges drawn from a small pool so duplicates are common.
fn arb_ranges_with_repeats() -> impl Strategy<Value = Vec<FoldRange>> {
    prop::collection::vec(arb_range(), 1..6).prop_flat_map(|pool| {
        let len = pool.len();
        prop::collection::vec(0..len, 0..24)
            .prop_map(move |picks| picks.into_iter().map(|i| pool[i]).collect())
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: PROPTEST_CASES, .. ProptestConfig::default() })]

    #[test]
    fn decode_inverts_encode(ranges in prop::collection::vec(arb_range(), 0..32)) {
        let id = RecordId::from("ab12cd34");
        let text = codec::encode(&ranges).unwrap();
        prop_assert_eq!(codec::decode(&id, &text).unwrap(), ranges);
    }

    #[test]
    fn reversed_ranges_never_decode(
        before in prop::collection::vec(arb_range(), 0..8),
        range in arb_range(),
    ) {
        prop_assume!(range.start != range.end);
        let mut ranges = before;
        ranges.push(FoldRange::new(range.end, range.start));

        let text = codec::encode(&ranges).unwrap();
        let decoded = codec::decode(&RecordId::from("ab12cd34"), &text);
        prop_assert!(decoded.is_err());
    }

    #[test]
    fn dedup_keeps_first_occurrences_in_order(ranges in arb_ranges_with_repeats()) {
        let deduped = dedup_ranges(ranges.clone());

        let mut expected: Vec<FoldRange> = Vec::new();
        for range in &ranges {
            if !expected.contains(range) {
                expected.push(*range);
            }
        }
        prop_assert_eq!(&deduped, &expected);
        prop_assert_eq!(dedup_ranges(deduped.clone()), deduped);
    }
}
