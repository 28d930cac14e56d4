use crate::constants::MAIL_FROM;
use anyhow::Context;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::env;

pub struct MailRequest {
	pub from: String,
	pub to: String,
	pub subject: String,
	pub text: String,
	pub html: String,
}

// Best-effort collaborator: callers log failures and carry on.
pub fn send_mail(req: MailRequest) -> anyhow::Result<()> {
	let relay = env::var("SMTP_RELAY").context("SMTP_RELAY can not be found in .env file")?;
	let username = env::var("ADMIN_EMAIL").context("ADMIN_EMAIL can not be found in .env file")?;
	let password = env::var("ADMIN_PASS").context("ADMIN_PASS can not be found in .env file")?;

	let message = Message::builder()
		.from(req.from.parse().context("sender address is not correct")?)
		.to(req.to.parse().context("recipient address is not correct")?)
		.subject(req.subject)
		.multipart(MultiPart::alternative_plain_html(req.text, req.html))?;

	let creds = Credentials::new(username, password);
	let mailer = SmtpTransport::relay(&relay)?.credentials(creds).build();
	mailer.send(&message)?;

	Ok(())
}

pub fn send_verification_email(to: &str, firstname: &str, code: &str) -> anyhow::Result<()> {
	let text = format!("Hi {}, your verification code is {}.", firstname, code);
	let html = format!(
		r#"<div>
<p style="padding:10px;background-color:yellow;color:black;text-align:center"> ZetaHub Inc. </p>
<p style="margin-top:10px;text-align:left;color:black;padding:15px;"> Hello {}, we noticed you just created an account on our site.
Please verify your account with the code below </p>
<p> <small> Please reach out to us if you did not request this email </small> </p>
</div>"#,
		firstname
	);

	send_mail(MailRequest {
		from: MAIL_FROM.to_string(),
		to: to.to_string(),
		subject: "Verify your ZetaHub account".to_string(),
		text,
		html,
	})
}
