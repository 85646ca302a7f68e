use serde_json::json;
use valuora_core::{Credentials, EnvelopeWarning};

use crate::cli::LoginArgs;
use crate::error::CliError;

use super::{CommandResult, Context};

pub fn login(args: &LoginArgs, context: &Context) -> Result<CommandResult, CliError> {
    let credentials = Credentials::new(&args.email, &args.password);
    let session = context.sessions().login(&credentials)?;

    Ok(CommandResult::ok(json!({
        "email": session.email,
        "issuedAt": session.issued_at,
    })))
}

pub fn logout(context: &Context) -> Result<CommandResult, CliError> {
    let was_logged_in = context.sessions().logout()?;

    let result = CommandResult::ok(json!({ "loggedOut": was_logged_in }));
    if was_logged_in {
        Ok(result)
    } else {
        Ok(result.with_warning(EnvelopeWarning::no_session()))
    }
}

pub fn whoami(context: &Context) -> Result<CommandResult, CliError> {
    let data = match context.sessions().current()? {
        Some(session) => json!({
            "loggedIn": true,
            "email": session.email,
            "issuedAt": session.issued_at,
        }),
        None => json!({ "loggedIn": false }),
    };

    Ok(CommandResult::ok(data))
}
