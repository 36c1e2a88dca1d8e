use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::{ExitCode, Termination},
    time::{Duration, Instant},
};

use clap::{Args, Parser, Subcommand};
use log::{debug, error, info, LevelFilter};
use miette::{IntoDiagnostic, Result, WrapErr};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use fwdform::{
    compose_form_submission, compose_plain_message, template::Template, Dispatch, FormParams,
    FormTemplates, FwdformError, Settings,
};

#[derive(Debug, Parser)]
#[clap(version, about = "Render form relay templates and compose the mail they produce")]
struct Options {
    /// Utility log level
    ///
    /// Set to `debug` when submitting a bug report.
    #[clap(long, default_value = "info", global = true)]
    log_level: LevelFilter,

    /// Sender address for notifications.
    ///
    /// Defaults to `$DEFAULT_SENDER`, or `fwdform@$MAILGUN_DOMAIN`.
    #[clap(long, global = true)]
    default_sender: Option<String>,

    /// Print results as JSON.
    #[clap(long, global = true)]
    json: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a single template with the submitted fields.
    Render {
        /// Template text.
        template: String,

        /// Treat TEMPLATE as the path of a file holding the template.
        #[clap(long)]
        file: bool,

        #[clap(flatten)]
        submission: Submission,
    },

    /// Compose the mail for a submission to a stored form.
    Submit {
        /// Form definition, TOML or (with a `.json` extension) JSON.
        #[clap(long, value_name = "PATH")]
        form: PathBuf,

        /// Address of the form owner.
        #[clap(long, value_name = "EMAIL")]
        owner: String,

        #[clap(flatten)]
        submission: Submission,
    },

    /// Compose the mail for a plain contact message, without a stored form.
    Message {
        /// Address of the form owner.
        #[clap(long, value_name = "EMAIL")]
        owner: String,

        #[clap(flatten)]
        submission: Submission,
    },
}

#[derive(Debug, Args)]
struct Submission {
    /// A submitted field. May be repeated; the first value of a field wins.
    #[clap(short = 'v', long = "value", value_name = "NAME=VALUE", value_parser = parse_key_val)]
    values: Vec<(String, String)>,

    /// A url-encoded request body, or `-` to read it from stdin.
    ///
    /// Its fields come after any given with `--value`.
    #[clap(long, value_name = "BODY")]
    form_data: Option<String>,
}

/// Parse a single key-value pair
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid NAME=VALUE: no `=` found in `{s}`"))?;
    Ok((k.to_string(), v.to_string()))
}

impl Submission {
    fn into_params(self) -> Result<FormParams> {
        let mut params: FormParams = self.values.into_iter().collect();

        let body = match self.form_data.as_deref() {
            Some("-") => {
                let mut body = Vec::new();
                io::stdin()
                    .read_to_end(&mut body)
                    .map_err(FwdformError::from)
                    .wrap_err("Reading form data from stdin failed.")?;
                Some(body)
            }
            Some(data) => Some(data.as_bytes().to_vec()),
            None => None,
        };
        if let Some(body) = body {
            params.extend_urlencoded(&body);
        }

        debug!("Submitted {} field(s)", params.len());
        Ok(params)
    }
}

enum MainExit {
    Success(Duration),
    Error(FwdformError),
    Report(miette::Report),
}

impl Termination for MainExit {
    fn report(self) -> ExitCode {
        match self {
            Self::Success(spent) => {
                debug!("Done in {spent:?}");
                ExitCode::SUCCESS
            }
            Self::Error(err) => err.report(),
            Self::Report(err) => {
                error!("Fatal error:");
                eprintln!("{err:?}");
                ExitCode::from(16)
            }
        }
    }
}

fn main() -> MainExit {
    let start = Instant::now();
    let result = entry();
    let done = start.elapsed();

    result.map(|_| MainExit::Success(done)).unwrap_or_else(|err| {
        err.downcast::<FwdformError>()
            .map(MainExit::Error)
            .unwrap_or_else(MainExit::Report)
    })
}

fn entry() -> Result<()> {
    let opts = Options::parse();

    // Setup logging
    let mut log_config = ConfigBuilder::new();
    log_config.set_location_level(LevelFilter::Off);
    TermLogger::init(
        opts.log_level,
        log_config.build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .into_diagnostic()?;

    let settings = || -> Result<Settings, FwdformError> {
        match &opts.default_sender {
            Some(sender) => Ok(Settings::new(sender.clone())),
            None => Settings::from_env(),
        }
    };

    match opts.command {
        Command::Render {
            template,
            file,
            submission,
        } => {
            let source = if file {
                read_file(Path::new(&template), "template")?
            } else {
                template
            };
            let params = submission.into_params()?;

            let rendered = Template::parse(&source)
                .render(&params)
                .map_err(FwdformError::from)?;
            if opts.json {
                println!("{}", serde_json::to_string(&rendered).map_err(FwdformError::from)?);
            } else {
                println!("{rendered}");
            }
        }
        Command::Submit {
            form,
            owner,
            submission,
        } => {
            let source = read_file(&form, "form definition")?;
            let definition = if form.extension().map_or(false, |ext| ext == "json") {
                FormTemplates::from_json(&source)?
            } else {
                FormTemplates::from_toml(&source)?
            };
            definition.validate()?;
            debug!("Form looks up: {:?}", definition.parameters());

            let params = submission.into_params()?;
            let dispatch = compose_form_submission(&definition, &owner, &params, &settings()?)?;
            print_dispatch(&dispatch, opts.json)?;
        }
        Command::Message { owner, submission } => {
            let params = submission.into_params()?;
            let dispatch = compose_plain_message(&owner, &params, &settings()?)?;
            print_dispatch(&dispatch, opts.json)?;
        }
    }

    Ok(())
}

fn read_file(path: &Path, what: &str) -> Result<String> {
    debug!("Reading {what}: {}", path.display());
    fs::read_to_string(path)
        .map_err(FwdformError::from)
        .wrap_err_with(|| format!("Reading {what} {} failed.", path.display()))
}

fn print_dispatch(dispatch: &Dispatch, json: bool) -> Result<(), FwdformError> {
    if json {
        println!("{}", serde_json::to_string_pretty(dispatch)?);
        return Ok(());
    }

    println!("{}", dispatch.notification);
    if let Some(response) = &dispatch.response {
        println!("\n=== auto-response ===\n{response}");
    }
    if let Some(redirect) = &dispatch.redirect {
        info!("Submitter is redirected to {redirect}");
    }

    Ok(())
}
