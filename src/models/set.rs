//! Catalog of known query sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Whether a set needs account credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

/// A set name that is not in the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown marketplace set: {0}")]
pub struct UnknownSet(pub String);

macro_rules! marketplace_sets {
    ($($variant:ident => $name:literal, $visibility:ident;)+) => {
        /// A named query type against the marketplace API.
        ///
        /// ```
        /// use marketplace_client::{MarketplaceSet, Visibility};
        ///
        /// let set: MarketplaceSet = "recent-sales".parse().unwrap();
        /// assert_eq!(set, MarketplaceSet::RecentSales);
        /// assert_eq!(set.visibility(), Visibility::Private);
        /// ```
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum MarketplaceSet {
            $($variant,)+
        }

        impl MarketplaceSet {
            /// Every known set, public ones first.
            pub const ALL: &'static [MarketplaceSet] = &[$(MarketplaceSet::$variant,)+];

            /// Set name as it appears in request URLs and response payloads.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(MarketplaceSet::$variant => $name,)+
                }
            }

            pub fn visibility(&self) -> Visibility {
                match self {
                    $(MarketplaceSet::$variant => Visibility::$visibility,)+
                }
            }
        }

        impl FromStr for MarketplaceSet {
            type Err = UnknownSet;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(MarketplaceSet::$variant),)+
                    other => Err(UnknownSet(other.to_string())),
                }
            }
        }
    };
}

marketplace_sets! {
    Releases => "releases", Public;
    BlogPosts => "blog-posts", Public;
    ActiveThreads => "active-threads", Public;
    NumberOfFiles => "number-of-files", Public;
    ForumPosts => "forum_posts", Public;
    NewFiles => "new-files", Public;
    NewFilesFromUser => "new-files-from-user", Public;
    Popular => "popular", Public;
    User => "user", Public;
    UserItemsBySite => "user-items-by-site", Public;
    Item => "item", Public;
    ItemPrices => "item-prices", Public;
    Features => "features", Public;
    Search => "search", Public;
    Collection => "collection", Public;
    TotalUsers => "total-users", Public;
    ThreadStatus => "thread-status", Public;
    RandomNewFiles => "random-new-files", Public;
    Vitals => "vitals", Private;
    EarningsAndSalesByMonth => "earnings-and-sales-by-month", Private;
    Statement => "statement", Private;
    RecentSales => "recent-sales", Private;
    Account => "account", Private;
    VerifyPurchase => "verify-purchase", Private;
    DownloadPurchase => "download-purchase", Private;
}

impl MarketplaceSet {
    pub fn is_private(&self) -> bool {
        self.visibility() == Visibility::Private
    }
}

impl fmt::Display for MarketplaceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MarketplaceSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MarketplaceSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
