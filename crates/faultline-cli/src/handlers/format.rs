//! Format command handler

use super::utils::parse_tokens;
use crate::cli::FormatArgs;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use faultline_core::TemplateEngine;

/// Handle the format command
pub fn handle_format(args: FormatArgs, output: &mut OutputWriter) -> Result<()> {
    if args.strict && args.tokens.is_empty() {
        return Err(Error::invalid_args("--strict needs at least one --token"));
    }

    let tokens = parse_tokens(&args.tokens)?;
    let rendering = TemplateEngine::render_detailed(&args.template, tokens.as_ref());

    output.rendering(&rendering)?;

    if args.strict && rendering.is_degraded() {
        return Err(Error::UnresolvedTokens {
            missing: rendering.missing,
        });
    }
    Ok(())
}
