use super::handlers::{health, login, signup};
use utoipa::openapi::{Contact, InfoBuilder, License, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Reuse the same router wiring and only return the generated OpenAPI document.
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// Routes registered here are both served and documented. Routes added in
/// `api::app` (like `/` or `OPTIONS /health`) are not documented.
pub(crate) fn api_router() -> OpenApiRouter {
    // `routes!` reads #[utoipa::path] to bind HTTP method + path and add the route to OpenAPI.
    OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(health::health))
        .routes(routes!(signup::signup))
        .routes(routes!(login::login))
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    // Use Cargo.toml metadata instead of the utoipa-axum crate info defaults.
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.contact = contact(env!("CARGO_PKG_AUTHORS"));
    info.license = Some(License::new(env!("CARGO_PKG_LICENSE")));

    let mut accounts_tag = Tag::new("accounts");
    accounts_tag.description = Some("Account registration and credential checks".to_string());

    let mut health_tag = Tag::new("health");
    health_tag.description = Some("Service and database status".to_string());

    OpenApiBuilder::new()
        .info(info)
        .tags(Some(vec![accounts_tag, health_tag]))
        .build()
}

/// Contact from a single `Name <email>` author entry.
fn contact(author: &str) -> Option<Contact> {
    let (name, email) = author.split_once('<')?;
    let mut contact = Contact::new();
    contact.name = Some(name.trim().to_string()).filter(|name| !name.is_empty());
    contact.email = Some(email.trim_end_matches('>').trim().to_string());
    Some(contact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_info_from_cargo() {
        let doc = openapi();
        assert_eq!(doc.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(doc.info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(
            doc.info.description.as_deref(),
            Some(env!("CARGO_PKG_DESCRIPTION"))
        );

        let contact = doc.info.contact;
        assert!(contact.is_some());
        if let Some(contact) = contact {
            assert_eq!(contact.name.as_deref(), Some("Team Accounts"));
            assert_eq!(contact.email.as_deref(), Some("team@accounts.dev"));
        }

        let license = doc.info.license;
        assert!(license.is_some());
        if let Some(license) = license {
            assert_eq!(license.name, "BSD-3-Clause");
        }
    }

    #[test]
    fn openapi_tags_and_paths() {
        let doc = openapi();
        let tags = doc.tags.clone().unwrap_or_default();
        assert!(tags.iter().any(|tag| tag.name == "accounts"));
        assert!(tags.iter().any(|tag| tag.name == "health"));
        assert!(doc.paths.paths.contains_key("/signup"));
        assert!(doc.paths.paths.contains_key("/login"));
        assert!(doc.paths.paths.contains_key("/health"));
    }

    #[test]
    fn contact_from_author() {
        let parsed = contact("Team <team@example.com>");
        assert_eq!(
            parsed.as_ref().and_then(|c| c.name.as_deref()),
            Some("Team")
        );
        assert_eq!(
            parsed.as_ref().and_then(|c| c.email.as_deref()),
            Some("team@example.com")
        );

        let parsed = contact("<team@example.com>");
        assert_eq!(parsed.as_ref().and_then(|c| c.name.as_deref()), None);

        assert!(contact("Team").is_none());
    }
}
