//! Child process plumbing shared by the transports

use std::io::{self, Write};
use std::process::{Child, Output};
use std::thread;

/// Feed `input` to the child's stdin while draining its output, then reap it
///
/// The child may exit before reading all of its input; the resulting broken
/// pipe is not an error, its exit status decides the outcome.
pub(super) fn finish(mut child: Child, input: Option<&[u8]>) -> io::Result<Output> {
    let stdin = child.stdin.take();

    thread::scope(|scope| {
        let writer = match (stdin, input) {
            (Some(mut stdin), Some(input)) => Some(scope.spawn(move || {
                // Dropping stdin at the end of the closure closes the pipe
                match stdin.write_all(input) {
                    Err(err) if err.kind() != io::ErrorKind::BrokenPipe => Err(err),
                    _ => Ok(()),
                }
            })),
            _ => None,
        };

        let output = child.wait_with_output();

        let written = match writer {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked"))),
            None => Ok(()),
        };

        let output = output?;
        written.map(|()| output)
    })
}
