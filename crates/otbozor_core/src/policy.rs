//! Status-to-action projection shared by every screen.
//!
//! The backend owns the lifecycle; this module only decides which buttons a
//! row shows for its last-known status. Screens refuse any action that is not
//! in the set returned here.
use crate::model::{Listing, ListingStatus, Product, ProductStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Listing,
    Product,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityStatus {
    Listing(ListingStatus),
    Product(ProductStatus),
}

impl EntityStatus {
    pub fn kind(self) -> EntityKind {
        match self {
            EntityStatus::Listing(_) => EntityKind::Listing,
            EntityStatus::Product(_) => EntityKind::Product,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Owner,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Edit,
    Submit,
    /// Reopens the wizard on its review step for a listing already in review.
    Finish,
    Pay,
    Archive,
    Delete,
    Reactivate,
    Approve,
    Reject,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Edit => "Tahrirlash",
            Action::Submit => "Yuborish",
            Action::Finish => "Yakunlash",
            Action::Pay => "To'lash",
            Action::Archive => "Arxivlash",
            Action::Delete => "O'chirish",
            Action::Reactivate => "Qayta faollashtirish",
            Action::Approve => "Tasdiqlash",
            Action::Reject => "Rad etish",
        }
    }

    /// Parses the lowercase English name used on the command line.
    pub fn from_key(key: &str) -> Option<Self> {
        let action = match key.trim().to_ascii_lowercase().as_str() {
            "edit" => Action::Edit,
            "submit" => Action::Submit,
            "finish" => Action::Finish,
            "pay" => Action::Pay,
            "archive" => Action::Archive,
            "delete" => Action::Delete,
            "reactivate" => Action::Reactivate,
            "approve" => Action::Approve,
            "reject" => Action::Reject,
            _ => return None,
        };
        Some(action)
    }
}

/// Ordered set of actions; the order is the render order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionSet(Vec<Action>);

impl ActionSet {
    fn of(actions: &[Action]) -> Self {
        Self(actions.to_vec())
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ActionSet {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The single place that maps a status to the buttons a row may show.
pub fn actions_for(status: EntityStatus, paid: bool, role: Role) -> ActionSet {
    use Action::*;
    match (status, role) {
        (EntityStatus::Listing(status), Role::Owner) => match status {
            ListingStatus::Draft if !paid => ActionSet::of(&[Pay, Edit]),
            ListingStatus::Draft => ActionSet::of(&[Submit, Edit]),
            ListingStatus::Pending => ActionSet::of(&[Finish, Edit]),
            ListingStatus::Approved => ActionSet::of(&[Edit, Archive]),
            ListingStatus::Rejected => ActionSet::of(&[Edit, Delete]),
            ListingStatus::Expired => ActionSet::of(&[Edit, Reactivate]),
            ListingStatus::Archived => ActionSet::of(&[Delete]),
        },
        (EntityStatus::Listing(status), Role::Admin) => match status {
            ListingStatus::Pending => ActionSet::of(&[Approve, Reject, Delete]),
            ListingStatus::Approved => ActionSet::of(&[Reject, Delete]),
            ListingStatus::Rejected => ActionSet::of(&[Approve, Delete]),
            ListingStatus::Draft | ListingStatus::Expired | ListingStatus::Archived => {
                ActionSet::of(&[Delete])
            }
        },
        (EntityStatus::Product(status), Role::Owner) => match status {
            ProductStatus::Draft => ActionSet::of(&[Edit, Submit, Delete]),
            ProductStatus::Published => ActionSet::of(&[Edit, Archive]),
            ProductStatus::Archived => ActionSet::of(&[Delete]),
        },
        (EntityStatus::Product(status), Role::Admin) => match status {
            ProductStatus::Draft | ProductStatus::Archived => ActionSet::of(&[Approve, Delete]),
            ProductStatus::Published => ActionSet::of(&[Archive, Delete]),
        },
    }
}

pub fn listing_actions(listing: &Listing, role: Role) -> ActionSet {
    actions_for(
        EntityStatus::Listing(listing.status),
        listing.is_settled(),
        role,
    )
}

pub fn product_actions(product: &Product, role: Role) -> ActionSet {
    actions_for(EntityStatus::Product(product.status), true, role)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

pub fn badge_for(status: EntityStatus, paid: bool) -> Badge {
    let (label, tone) = match status {
        EntityStatus::Listing(ListingStatus::Draft) if !paid => ("To'lanmagan", BadgeTone::Warning),
        EntityStatus::Listing(ListingStatus::Draft) => ("Qoralama", BadgeTone::Neutral),
        EntityStatus::Listing(ListingStatus::Pending) => ("Tekshiruvda", BadgeTone::Info),
        EntityStatus::Listing(ListingStatus::Approved) => ("Faol", BadgeTone::Success),
        EntityStatus::Listing(ListingStatus::Rejected) => ("Rad etilgan", BadgeTone::Danger),
        EntityStatus::Listing(ListingStatus::Expired) => ("Muddati tugagan", BadgeTone::Warning),
        EntityStatus::Listing(ListingStatus::Archived) => ("Arxivlangan", BadgeTone::Neutral),
        EntityStatus::Product(ProductStatus::Draft) => ("Qoralama", BadgeTone::Neutral),
        EntityStatus::Product(ProductStatus::Published) => ("Faol", BadgeTone::Success),
        EntityStatus::Product(ProductStatus::Archived) => ("Arxivlangan", BadgeTone::Neutral),
    };
    Badge { label, tone }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_never_offered_on_approved() {
        for paid in [false, true] {
            for role in [Role::Owner, Role::Admin] {
                let set = actions_for(EntityStatus::Listing(ListingStatus::Approved), paid, role);
                assert!(!set.contains(Action::Submit));
            }
        }
    }

    #[test]
    fn pay_only_offered_on_unpaid_draft() {
        for status in ListingStatus::ALL {
            for paid in [false, true] {
                let set = actions_for(EntityStatus::Listing(status), paid, Role::Owner);
                let expected = status == ListingStatus::Draft && !paid;
                assert_eq!(set.contains(Action::Pay), expected, "{status:?} paid={paid}");
            }
        }
    }

    #[test]
    fn owner_never_sees_moderation_actions() {
        for status in ListingStatus::ALL {
            let set = actions_for(EntityStatus::Listing(status), true, Role::Owner);
            assert!(!set.contains(Action::Approve));
            assert!(!set.contains(Action::Reject));
        }
    }

    #[test]
    fn action_keys_parse_case_insensitively() {
        assert_eq!(Action::from_key(" Reactivate "), Some(Action::Reactivate));
        assert_eq!(Action::from_key("ban"), None);
    }
}
