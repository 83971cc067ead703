//! Framing shared by the client and the authority.
//!
//! The protocol is newline-delimited plaintext over TCP. A connection carries exactly one
//! request and one response: the client writes the transaction identifier as a single line,
//! the authority answers with zero or more digest lines followed by [`SENTINEL`]. Digest lines
//! are fixed-length lowercase hex (see [`mip_core::digest`]) and therefore can never equal the
//! sentinel; nothing is ever escaped.

use tokio::net::{
    tcp::{OwnedReadHalf, OwnedWriteHalf},
    TcpStream,
};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

/// The line terminating a sibling-list response.
pub const SENTINEL: &str = "done";

/// The authority port in the reference deployment.
pub const DEFAULT_PORT: u16 = 1111;

/// The maximum accepted line length, on either side. Digest lines are 64 characters; this
/// bounds transaction identifier lines and cuts off a misbehaving peer.
pub const MAX_LINE_LEN: usize = 4096;

/// Split a stream into line-framed read and write halves.
pub(crate) fn split_lines(
    stream: TcpStream,
) -> (
    FramedRead<OwnedReadHalf, LinesCodec>,
    FramedWrite<OwnedWriteHalf, LinesCodec>,
) {
    let (rd, wr) = stream.into_split();
    let rd_lines = FramedRead::new(rd, LinesCodec::new_with_max_length(MAX_LINE_LEN));
    let wr_lines = FramedWrite::new(wr, LinesCodec::new_with_max_length(MAX_LINE_LEN));
    (rd_lines, wr_lines)
}
