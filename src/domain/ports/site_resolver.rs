//! Site Resolver Port
//!
//! Turns a [`Site`] description into a live [`ContentSite`], applying the
//! site's decorators in registration order.

use crate::domain::entities::Site;

use super::content_site::ContentSite;

/// Opens site descriptions for execution
pub trait SiteResolver: Send + Sync {
    /// Open `site`; never fails, root problems surface on first access
    fn open(&self, site: &Site) -> Box<dyn ContentSite>;
}
