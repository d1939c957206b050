//! Merging of adjacent tokens that share a tag.

use std::iter::{Fuse, FusedIterator};

use crate::token::Token;

/// Iterator adapter concatenating consecutive tokens with equal tags.
///
/// Created by [`merge_tokens`] or [`MergeExt::merged`]. The output is the
/// maximal run-length encoding of the input by tag: no two adjacent output
/// tokens share a tag and the concatenated text is unchanged. Empty input
/// yields nothing.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct MergeTokens<I, T> {
    inner: Fuse<I>,
    pending: Option<Token<T>>,
}

/// Merge consecutive tokens sharing a tag.
pub fn merge_tokens<I, T>(tokens: I) -> MergeTokens<I::IntoIter, T>
where
    I: IntoIterator<Item = Token<T>>,
    T: PartialEq,
{
    MergeTokens {
        inner: tokens.into_iter().fuse(),
        pending: None,
    }
}

impl<I, T> Iterator for MergeTokens<I, T>
where
    I: Iterator<Item = Token<T>>,
    T: PartialEq,
{
    type Item = Token<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut current = self.pending.take().or_else(|| self.inner.next())?;
        for token in self.inner.by_ref() {
            if token.tag == current.tag {
                current.text.push_str(&token.text);
            } else {
                self.pending = Some(token);
                break;
            }
        }
        Some(current)
    }
}

impl<I, T> FusedIterator for MergeTokens<I, T>
where
    I: Iterator<Item = Token<T>>,
    T: PartialEq,
{
}

/// Extension trait adding [`merged`](MergeExt::merged) to token iterators.
pub trait MergeExt<T>: Iterator<Item = Token<T>> + Sized {
    fn merged(self) -> MergeTokens<Self, T>
    where
        T: PartialEq,
    {
        merge_tokens(self)
    }
}

impl<I, T> MergeExt<T> for I where I: Iterator<Item = Token<T>> {}
