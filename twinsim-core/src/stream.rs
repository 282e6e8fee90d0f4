//! Pull-Based Streams
//!
//! Sources hand out items with `nb::Result`, so a tick loop can drain
//! whatever is ready without blocking and without an async runtime:
//!
//! - `Ok(item)`: next item is available
//! - `Err(nb::Error::WouldBlock)`: nothing is due yet, poll again next tick
//! - `Err(nb::Error::Other(StreamError::EndOfStream))`: the source is done
//!
//! ```rust
//! use twinsim_core::stream::{drain_ready, Stream, StreamError};
//!
//! struct Countdown(u32);
//!
//! impl Stream for Countdown {
//!     type Item = u32;
//!     type Error = StreamError;
//!
//!     fn poll_next(&mut self) -> nb::Result<u32, StreamError> {
//!         if self.0 == 0 {
//!             return Err(nb::Error::Other(StreamError::EndOfStream));
//!         }
//!         self.0 -= 1;
//!         Ok(self.0)
//!     }
//! }
//!
//! let (items, finished) = drain_ready(&mut Countdown(3));
//! assert_eq!(items, vec![2, 1, 0]);
//! assert!(finished);
//! ```

use thiserror::Error;

/// Errors reported by a stream
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    /// Source has no more items; sticky once returned
    #[error("end of stream")]
    EndOfStream,
}

/// Non-blocking source of items
pub trait Stream {
    /// Type of items produced by the stream
    type Item;

    /// Type of errors that can occur
    type Error;

    /// Attempt to pull the next item
    ///
    /// Must not block. `WouldBlock` may be returned any number of times.
    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error>;

    /// Bounds on remaining items, as `Iterator::size_hint`
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

/// Pull every item that is ready right now
///
/// Returns the items and whether the stream reported `EndOfStream`.
pub fn drain_ready<S>(stream: &mut S) -> (Vec<S::Item>, bool)
where
    S: Stream<Error = StreamError>,
{
    let mut items = Vec::with_capacity(stream.size_hint().0);
    loop {
        match stream.poll_next() {
            Ok(item) => items.push(item),
            Err(nb::Error::WouldBlock) => return (items, false),
            Err(nb::Error::Other(StreamError::EndOfStream)) => return (items, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gate {
        open: usize,
        items: Vec<u8>,
        position: usize,
    }

    impl Stream for Gate {
        type Item = u8;
        type Error = StreamError;

        fn poll_next(&mut self) -> nb::Result<u8, StreamError> {
            if self.position >= self.items.len() {
                return Err(nb::Error::Other(StreamError::EndOfStream));
            }
            if self.position >= self.open {
                return Err(nb::Error::WouldBlock);
            }
            self.position += 1;
            Ok(self.items[self.position - 1])
        }
    }

    #[test]
    fn drain_stops_at_would_block() {
        let mut gate = Gate { open: 2, items: vec![1, 2, 3], position: 0 };

        assert_eq!(drain_ready(&mut gate), (vec![1, 2], false));
        assert_eq!(drain_ready(&mut gate), (vec![], false));

        gate.open = 3;
        assert_eq!(drain_ready(&mut gate), (vec![3], true));
        assert_eq!(drain_ready(&mut gate), (vec![], true));
    }

    #[test]
    fn error_display() {
        assert_eq!(StreamError::EndOfStream.to_string(), "end of stream");
    }
}
