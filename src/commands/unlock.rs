//! Read a post, prompting for the secret when it is private

use anyhow::{anyhow, Result};
use std::io::{self, BufRead, Write};

use super::show;
use crate::access::{PrivatePostView, SecretGate, SessionStore, Submission, ViewState};
use crate::Blog;

/// Outcome of an unlock session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Shown,
    Cancelled,
}

/// Run against the terminal
pub fn run(blog: &Blog, slug: &str, html: bool) -> Result<Outcome> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(blog, &blog.gate(), slug, html, stdin.lock(), stdout.lock())
}

/// Drive the view state machine over the given input and output
///
/// End of input closes the prompt.
pub fn run_with<R: BufRead, W: Write>(
    blog: &Blog,
    gate: &SecretGate,
    slug: &str,
    html: bool,
    mut input: R,
    mut output: W,
) -> Result<Outcome> {
    let post = blog
        .repository()
        .get_post(slug)?
        .ok_or_else(|| anyhow!("Post not found: {}", slug))?;

    if post.is_private {
        let mut view = PrivatePostView::new(
            post.slug.as_str(),
            SessionStore::new(),
            blog.config.gate.confirm_delay(),
        );

        while view.open()? == ViewState::Prompting {
            write!(output, "Password for '{}': ", post.slug)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                view.dismiss()?;
                writeln!(output, "\nCancelled.")?;
                return Ok(Outcome::Cancelled);
            }
            // Only the line terminator is stripped; the comparison is exact
            let candidate = line
                .strip_suffix('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l))
                .unwrap_or(line.as_str());

            match view.submit(gate, candidate)? {
                Submission::Unlocked { confirm_after } => {
                    writeln!(output, "Unlocked.")?;
                    std::thread::sleep(confirm_after);
                    break;
                }
                Submission::Rejected => writeln!(output, "Wrong password.")?,
            }
        }
    }

    write!(output, "{}{}", show::header(&post), show::body(&post, html))?;
    Ok(Outcome::Shown)
}
