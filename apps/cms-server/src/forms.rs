//! The per-site table of marketing forms.
//!
//! One entry per `/send*` endpoint: which payload fields the form carries,
//! how the email is labelled, and which fields may be absent. Adding a form
//! to the site means adding a row here, not another handler.

use beacon_core::domain::{FormField, FormRegistry, FormSpec};

/// Slug served at the bare `/send` path.
pub const DEFAULT_FORM: &str = "demo-class";

pub fn registry() -> FormRegistry {
    FormRegistry::new(vec![
        FormSpec {
            slug: DEFAULT_FORM,
            sender_label: "Demo Class Form",
            subject: "New French Demo Class Booking",
            heading: "You have a new demo class request!",
            fields: vec![
                FormField::required("username", "Name"),
                FormField::required("email", "Email"),
                FormField::optional("country-code", "Country Code", "Not specified"),
                FormField::optional("phone-number", "Phone", "Not specified"),
                FormField::optional("language_lvl", "Selected Level", "Not selected"),
                FormField::optional("message", "Additional Message", "None"),
            ],
        },
        FormSpec {
            slug: "contactUsForm",
            sender_label: "Contact Us Page Enquiry",
            subject: "Contact Us Page enquiry",
            heading: "Contact Us Page Enquiry!",
            fields: vec![
                FormField::optional("service", "Service Chosen", "Not specified"),
                FormField::required("username", "Name"),
                FormField::required("email", "Email"),
                FormField::optional("message", "Message", "None"),
            ],
        },
        FormSpec {
            slug: "indexG",
            sender_label: "Course Inquiry Form",
            subject: "German classes enquiry",
            heading: "You have a new Course Inquiry!",
            fields: vec![
                FormField::optional("level", "Course Type", "Not specified"),
                FormField::required("name", "Name"),
                FormField::required("email", "Email"),
                FormField::optional("message", "Message", "None"),
            ],
        },
        FormSpec {
            slug: "contact",
            sender_label: "Website Contact Form",
            subject: "Get in touch form from German Page",
            heading: "New Contact Message Received",
            fields: vec![
                FormField::required("firstName", "First Name"),
                FormField::optional("lastName", "Last Name", "Not specified"),
                FormField::required("email", "Email"),
                FormField::optional("countryCode", "Country Code", "Not specified"),
                FormField::optional("phoneNumber", "Phone", "Not specified"),
                FormField::optional("message", "Message", "None"),
            ],
        },
        FormSpec {
            slug: "contactUs",
            sender_label: "Contact Us Form",
            subject: "Germany Courses enquiry form",
            heading: "You have a new German Course Enquiry!",
            fields: vec![
                FormField::optional("level", "German Courses Selected", "Not specified"),
                FormField::required("name", "Name"),
                FormField::required("email", "Email"),
                FormField::optional("message", "Message", "None"),
            ],
        },
        // Booking form: every field is mandatory.
        FormSpec {
            slug: "german-form",
            sender_label: "German Booking Form",
            subject: "New German Course Booking",
            heading: "New German Course Booking",
            fields: vec![
                FormField::required("course", "Course"),
                FormField::required("name", "Name"),
                FormField::required("email", "Email"),
                FormField::required("phone", "Phone"),
            ],
        },
        FormSpec {
            slug: "ielts",
            sender_label: "Contact Us Form",
            subject: "Ielts Demo Class Enquiry Form",
            heading: "You have a new Ielts Demo Class Enquiry",
            fields: vec![
                FormField::required("name", "Name"),
                FormField::required("email", "Email"),
                FormField::optional("phoneNumber", "Phone Number", "Not specified"),
            ],
        },
        FormSpec {
            slug: "frenchReq",
            sender_label: "French Enquire Form",
            subject: "French Enquiry Class Form",
            heading: "You have a new French Class Enquiry",
            fields: vec![
                FormField::required("name", "Name"),
                FormField::required("email", "Email"),
                FormField::optional("course", "Course Selected", "Not specified"),
                FormField::optional("phone", "Phone Number", "Not specified"),
                FormField::optional("message", "Message", "None"),
            ],
        },
        FormSpec {
            slug: "ieltsCoaching",
            sender_label: "Ielts Coaching Form Option",
            subject: "Ielts Coaching Form",
            heading: "You have a new Ielts Class Enquiry",
            fields: vec![
                FormField::required("name", "Name"),
                FormField::required("email", "Email"),
                FormField::optional("course", "Course Selected", "Not specified"),
                FormField::optional("phone", "Phone Number", "Not specified"),
            ],
        },
        FormSpec {
            slug: "contactFormToefl",
            sender_label: "Toefl Page Enquiry",
            subject: "Toefl Page enquiry",
            heading: "TOEFL Contact Us Enquiry!",
            fields: vec![
                FormField::required("name", "Name"),
                FormField::required("email", "Email"),
                FormField::optional("phone", "Phone Number", "Not specified"),
                FormField::optional("message", "Message", "None"),
            ],
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_site_form() {
        let registry = registry();
        assert_eq!(registry.len(), 10);
        for slug in [
            DEFAULT_FORM,
            "contactUsForm",
            "indexG",
            "contact",
            "contactUs",
            "german-form",
            "ielts",
            "frenchReq",
            "ieltsCoaching",
            "contactFormToefl",
        ] {
            assert!(registry.get(slug).is_some(), "missing form '{slug}'");
        }
    }
}
