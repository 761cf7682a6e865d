use quickcheck::{Arbitrary, Gen};
use std::ops::Deref;

use crate::bip::bip39;
use crate::hdpath;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Wrapper<A>(A);
impl<A> Wrapper<A> {
    pub fn unwrap(self) -> A {
        self.0
    }
}
impl<A> Deref for Wrapper<A> {
    type Target = A;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl<A> From<A> for Wrapper<A> {
    fn from(a: A) -> Self {
        Wrapper(a)
    }
}

fn bytes<G: Gen>(g: &mut G, len: usize) -> Vec<u8> {
    ::std::iter::repeat_with(|| Arbitrary::arbitrary(g))
        .take(len)
        .collect()
}

impl Arbitrary for Wrapper<bip39::Type> {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        use bip39::Type::*;
        const TYPES: [bip39::Type; 5] = [
            Type12Words,
            Type15Words,
            Type18Words,
            Type21Words,
            Type24Words,
        ];
        let idx = u8::arbitrary(g) as usize % TYPES.len();
        Wrapper(TYPES[idx])
    }
}

impl Arbitrary for Wrapper<bip39::Entropy> {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let t = Wrapper::<bip39::Type>::arbitrary(g).unwrap();
        let vec = bytes(g, t.to_key_size() / 8);
        Wrapper(bip39::Entropy::from_slice(&vec).unwrap())
    }
}

impl Arbitrary for Wrapper<hdpath::Path> {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let depth = 1 + u8::arbitrary(g) as usize % 6;
        let indices: Vec<u32> = ::std::iter::repeat_with(|| {
            u32::arbitrary(g) % hdpath::HARDENED_OFFSET
        })
        .take(depth)
        .collect();
        Wrapper(hdpath::Path::hardened(&indices).unwrap())
    }
}
