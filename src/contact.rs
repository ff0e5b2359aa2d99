//! Contact form.
//!
//! Submitting the form never talks to a server. The fields are folded into a
//! `mailto:` URI and the page navigates to it, leaving delivery to the
//! visitor's mail client.

use maud::{Markup, html};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters `encodeURIComponent` leaves alone, so links match what browsers produce.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Message body as it appears in the mail client.
    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\n{}",
            self.name, self.email, self.message
        )
    }

    pub fn mailto_uri(&self, recipient: &str) -> String {
        format!(
            "mailto:{recipient}?subject={}&body={}",
            encode_component(&self.subject),
            encode_component(&self.body())
        )
    }
}

pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Contact details from the content settings, with the form's recipient.
#[derive(Debug, Clone, Default)]
pub struct ContactDetails<'a> {
    pub recipient: &'a str,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub instagram_url: Option<&'a str>,
    pub instagram_username: Option<&'a str>,
}

pub fn render_contact(details: &ContactDetails<'_>) -> Markup {
    html! {
        section.contact id="contact" {
            div.contact-details {
                a.contact-email href={ "mailto:" (details.recipient) } { (details.recipient) }
                @if let Some(phone) = details.phone {
                    a.contact-phone href={ "tel:" (phone) } { (phone) }
                }
                @if let Some(address) = details.address {
                    p.location-text { (address) }
                }
                @if let Some(url) = details.instagram_url {
                    a.instagram-link href=(url) target="_blank" rel="noopener" {
                        (details.instagram_username.unwrap_or("Instagram"))
                    }
                }
            }
            form.contact-form id="contact-form" data-email=(details.recipient) {
                label for="contact-name" { "Name" }
                input id="contact-name" type="text" name="name" required;
                label for="contact-email" { "Email" }
                input id="contact-email" type="email" name="email" required;
                label for="contact-subject" { "Subject" }
                input id="contact-subject" type="text" name="subject";
                label for="contact-message" { "Message" }
                textarea id="contact-message" name="message" rows="5" required {}
                button type="submit" { "Send Message" }
            }
        }
    }
}
