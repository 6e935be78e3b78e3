//! Company self-service for employers.
//!
//! # Invariants
//! - An employer has at most one company; saving updates it in place.

use crate::access::capability::{require_capability, Capability};
use crate::access::session::Actor;
use crate::model::company::{Company, CompanyDraft};
use crate::repo::JobBoardStore;
use crate::service::error::{ServiceError, ServiceResult};
use log::info;
use uuid::Uuid;

pub struct CompanyService<S: JobBoardStore> {
    store: S,
}

impl<S: JobBoardStore> CompanyService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The employer's company, if one was created.
    pub fn get_company(&self, actor: &Actor) -> ServiceResult<Option<Company>> {
        require_capability(actor, Capability::ManageCompany)?;
        Ok(self.store.find_company_by_owner(actor.profile_id)?)
    }

    /// Creates the employer's company or updates the existing one.
    pub fn save_company(&self, actor: &Actor, draft: &CompanyDraft) -> ServiceResult<Company> {
        require_capability(actor, Capability::ManageCompany)?;
        let draft = draft.normalized()?;

        let company_id = match self.store.find_company_by_owner(actor.profile_id)? {
            Some(existing) => {
                self.store.update_company(existing.id, &draft)?;
                existing.id
            }
            None => self.store.create_company(&Company {
                id: Uuid::new_v4(),
                user_id: actor.profile_id,
                company_name: draft.company_name,
                logo_url: draft.logo_url,
                website: draft.website,
                description: draft.description,
                created_at: 0,
                updated_at: 0,
            })?,
        };
        info!("event=company_save module=service status=ok company_id={company_id}");

        self.store
            .get_company(company_id)?
            .ok_or(ServiceError::NotFound {
                entity: "company",
                id: company_id,
            })
    }
}
