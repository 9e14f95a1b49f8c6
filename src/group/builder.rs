//! Group drafts: the editable form of a group before it is saved

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::group::split::even_split;
use crate::types::*;
use crate::utils::{money, validate_name, validate_non_negative_amount, validate_positive_amount};

/// A member as entered while creating or editing a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDraft {
    /// Existing member ID when editing; a new one is generated when absent
    pub id: Option<String>,
    pub name: String,
    pub amount_paid: BigDecimal,
    /// Explicit share overriding the even split
    pub should_pay: Option<BigDecimal>,
}

impl MemberDraft {
    /// New member whose share comes from the even split
    pub fn new(name: impl Into<String>, amount_paid: BigDecimal) -> Self {
        Self {
            id: None,
            name: name.into(),
            amount_paid,
            should_pay: None,
        }
    }

    /// Keep the ID of an existing member
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Override the even split for this member
    pub fn with_share(mut self, should_pay: BigDecimal) -> Self {
        self.should_pay = Some(should_pay);
        self
    }
}

impl From<&Member> for MemberDraft {
    fn from(member: &Member) -> Self {
        Self {
            id: Some(member.id.clone()),
            name: member.name.clone(),
            amount_paid: member.amount_paid.clone(),
            should_pay: member.share_overridden.then(|| member.should_pay.clone()),
        }
    }
}

/// Everything needed to create a group or replace an existing group's details.
///
/// Members can only be added or removed through a draft; once a group is saved
/// the only per-member change is recording what a member has paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDraft {
    pub name: String,
    pub description: String,
    pub total_amount: BigDecimal,
    pub members: Vec<MemberDraft>,
}

impl GroupDraft {
    /// Start a draft with no members
    pub fn new(name: impl Into<String>, total_amount: BigDecimal) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            total_amount,
            members: Vec::new(),
        }
    }

    /// Draft pre-filled from an existing group, for editing
    pub fn from_group(group: &Group) -> Self {
        Self {
            name: group.name.clone(),
            description: group.description.clone(),
            total_amount: group.total_amount.clone(),
            members: group.members.iter().map(MemberDraft::from).collect(),
        }
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a member
    pub fn member(mut self, member: MemberDraft) -> Self {
        self.members.push(member);
        self
    }

    /// Remove a member by ID
    pub fn remove_member(mut self, member_id: &str) -> Self {
        self.members.retain(|m| m.id.as_deref() != Some(member_id));
        self
    }

    /// Sum of what the drafted members have paid
    pub fn total_paid(&self) -> BigDecimal {
        let sum: BigDecimal = self.members.iter().map(|m| &m.amount_paid).sum();
        money::round2(&sum)
    }

    /// Check the rules every saved group must satisfy
    pub fn validate(&self) -> FinanceResult<()> {
        validate_name("Group name", &self.name)?;
        validate_positive_amount(&self.total_amount)
            .map_err(|_| FinanceError::Validation("Group total must be positive".to_string()))?;

        for member in &self.members {
            validate_name("Member name", &member.name)?;
            validate_non_negative_amount(&member.amount_paid)?;
            if let Some(share) = &member.should_pay {
                validate_non_negative_amount(share)?;
            }
        }

        if self.total_paid() > money::round2(&self.total_amount) {
            return Err(FinanceError::Validation(
                "Total paid amount cannot exceed the group total amount".to_string(),
            ));
        }

        Ok(())
    }

    /// Turn the drafted members into saved members, applying the even split
    /// and then any explicit share overrides
    pub fn build_members(&self) -> Vec<Member> {
        let mut members: Vec<Member> = self
            .members
            .iter()
            .map(|draft| {
                Member::new(
                    draft.id.clone().unwrap_or_else(new_id),
                    draft.name.trim().to_string(),
                    draft.amount_paid.clone(),
                )
            })
            .collect();

        even_split(&self.total_amount, &mut members);

        for (member, draft) in members.iter_mut().zip(&self.members) {
            if let Some(share) = &draft.should_pay {
                member.should_pay = money::round2(share);
                member.share_overridden = true;
            }
        }

        members
    }

    /// Build a brand new group from this draft without validating it
    pub fn build(&self) -> Group {
        Group::new(
            new_id(),
            self.name.trim().to_string(),
            self.description.clone(),
            money::round2(&self.total_amount),
            self.build_members(),
        )
    }
}
