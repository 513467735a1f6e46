//! Premium page gating.

use crate::auth::{Principal, SubscriptionTier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAccess {
    Granted(Principal),
    /// Absolute URL in the learner app to send the visitor to
    Redirect(String),
}

/// Decide whether a visitor may open a premium-only page.
///
/// Anonymous visitors go to sign-in, free-tier learners to the subscription
/// page, both under the visitor's current locale.
pub fn premium_gate(principal: Option<Principal>, locale: &str, app_url: &str) -> PageAccess {
    match principal {
        None => PageAccess::Redirect(app_page(app_url, locale, "sign-in")),
        Some(p) if p.subscription == SubscriptionTier::Premium => PageAccess::Granted(p),
        Some(_) => PageAccess::Redirect(app_page(app_url, locale, "subscription")),
    }
}

pub fn app_page(app_url: &str, locale: &str, page: &str) -> String {
    format!("{}/{}/{}", app_url.trim_end_matches('/'), locale, page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    fn learner(tier: SubscriptionTier) -> Principal {
        Principal {
            id: "user_1".to_string(),
            role: Role::User,
            subscription: tier,
            token: "tok".to_string(),
        }
    }

    #[test]
    fn premium_learner_is_granted() {
        let access = premium_gate(Some(learner(SubscriptionTier::Premium)), "en", "https://app.test");
        assert!(matches!(access, PageAccess::Granted(p) if p.id == "user_1"));
    }

    #[test]
    fn free_learner_goes_to_subscription_page() {
        let access = premium_gate(Some(learner(SubscriptionTier::Free)), "ar", "https://app.test/");
        assert_eq!(access, PageAccess::Redirect("https://app.test/ar/subscription".to_string()));
    }

    #[test]
    fn anonymous_visitor_goes_to_sign_in() {
        let access = premium_gate(None, "en", "https://app.test");
        assert_eq!(access, PageAccess::Redirect("https://app.test/en/sign-in".to_string()));
    }
}
