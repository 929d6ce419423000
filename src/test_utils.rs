use proptest::prelude::*;

pub fn arb_bytes(max: usize) -> impl Strategy<Value = Vec<u8>> {
	proptest::collection::vec(any::<u8>(), 0..=max)
}
