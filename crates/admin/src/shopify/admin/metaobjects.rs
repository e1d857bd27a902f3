//! Metaobject CRUD for the Admin API.

use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError, check_user_errors,
    queries::{
        GetMetaobject, GetMetaobjects, MetaobjectCreate, MetaobjectDelete, MetaobjectUpdate,
        get_metaobject, get_metaobjects,
    },
};
use crate::shopify::types::{
    Metaobject, MetaobjectConnection, MetaobjectField, MetaobjectInput, PageInfo,
};

/// Build a [`Metaobject`] from any generated metaobject selection.
///
/// Every operation selects the same fields into its own generated type.
macro_rules! convert_metaobject {
    ($metaobject:expr) => {{
        let metaobject = $metaobject;
        Metaobject {
            id: metaobject.id,
            handle: metaobject.handle,
            kind: metaobject.type_,
            updated_at: Some(metaobject.updated_at),
            fields: metaobject
                .fields
                .into_iter()
                .map(|f| MetaobjectField {
                    key: f.key,
                    value: f.value,
                })
                .collect(),
        }
    }};
}

impl AdminClient {
    /// List metaobjects of a type.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_metaobjects(
        &self,
        kind: &str,
        first: i64,
        after: Option<String>,
    ) -> Result<MetaobjectConnection, AdminShopifyError> {
        let variables = get_metaobjects::Variables {
            type_: kind.to_string(),
            first,
            after,
        };

        let response = self.execute::<GetMetaobjects>(variables).await?;

        Ok(MetaobjectConnection {
            metaobjects: response
                .metaobjects
                .nodes
                .into_iter()
                .map(|m| convert_metaobject!(m))
                .collect(),
            page_info: PageInfo {
                has_next_page: response.metaobjects.page_info.has_next_page,
                end_cursor: response.metaobjects.page_info.end_cursor,
            },
        })
    }

    /// List every metaobject of a type, following pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn get_all_metaobjects(&self, kind: &str) -> Result<Vec<Metaobject>, AdminShopifyError> {
        let mut all = Vec::new();
        let mut after = None;

        loop {
            let page = self.get_metaobjects(kind, 250, after).await?;
            all.extend(page.metaobjects);
            match page.page_info.end_cursor {
                Some(cursor) if page.page_info.has_next_page => after = Some(cursor),
                _ => break,
            }
        }

        Ok(all)
    }

    /// Get a metaobject by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(metaobject_id = %id))]
    pub async fn get_metaobject(&self, id: &str) -> Result<Option<Metaobject>, AdminShopifyError> {
        let response = self
            .execute::<GetMetaobject>(get_metaobject::Variables { id: id.to_string() })
            .await?;

        Ok(response.metaobject.map(|m| convert_metaobject!(m)))
    }

    /// Create a metaobject of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if Shopify rejects the fields.
    #[instrument(skip(self, input))]
    pub async fn create_metaobject(
        &self,
        kind: &str,
        input: &MetaobjectInput,
    ) -> Result<Metaobject, AdminShopifyError> {
        use super::queries::metaobject_create::{
            MetaobjectCreateInput, MetaobjectFieldInput, Variables,
        };

        let variables = Variables {
            metaobject: MetaobjectCreateInput {
                type_: kind.to_string(),
                handle: input.handle.clone(),
                fields: Some(
                    field_pairs(input)
                        .map(|(key, value)| MetaobjectFieldInput { key, value })
                        .collect(),
                ),
            },
        };

        let payload = self
            .execute::<MetaobjectCreate>(variables)
            .await?
            .metaobject_create
            .ok_or_else(|| AdminShopifyError::missing("metaobjectCreate payload"))?;
        check_user_errors(user_errors!(payload.user_errors))?;

        payload
            .metaobject
            .map(|m| convert_metaobject!(m))
            .ok_or_else(|| AdminShopifyError::missing("metaobject"))
    }

    /// Update a metaobject's fields.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if Shopify rejects the fields.
    #[instrument(skip(self, input), fields(metaobject_id = %id))]
    pub async fn update_metaobject(
        &self,
        id: &str,
        input: &MetaobjectInput,
    ) -> Result<Metaobject, AdminShopifyError> {
        use super::queries::metaobject_update::{
            MetaobjectFieldInput, MetaobjectUpdateInput, Variables,
        };

        let variables = Variables {
            id: id.to_string(),
            metaobject: MetaobjectUpdateInput {
                handle: input.handle.clone(),
                fields: Some(
                    field_pairs(input)
                        .map(|(key, value)| MetaobjectFieldInput { key, value })
                        .collect(),
                ),
            },
        };

        let payload = self
            .execute::<MetaobjectUpdate>(variables)
            .await?
            .metaobject_update
            .ok_or_else(|| AdminShopifyError::missing("metaobjectUpdate payload"))?;
        check_user_errors(user_errors!(payload.user_errors))?;

        payload
            .metaobject
            .map(|m| convert_metaobject!(m))
            .ok_or_else(|| AdminShopifyError::missing("metaobject"))
    }

    /// Delete a metaobject. Returns the deleted id.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if Shopify rejects the deletion and `NotFound`
    /// if nothing was deleted.
    #[instrument(skip(self), fields(metaobject_id = %id))]
    pub async fn delete_metaobject(&self, id: &str) -> Result<String, AdminShopifyError> {
        use super::queries::metaobject_delete::Variables;

        let payload = self
            .execute::<MetaobjectDelete>(Variables { id: id.to_string() })
            .await?
            .metaobject_delete
            .ok_or_else(|| AdminShopifyError::missing("metaobjectDelete payload"))?;
        check_user_errors(user_errors!(payload.user_errors))?;

        payload
            .deleted_id
            .ok_or_else(|| AdminShopifyError::NotFound(id.to_string()))
    }
}

fn field_pairs(input: &MetaobjectInput) -> impl Iterator<Item = (String, String)> + '_ {
    input
        .fields
        .iter()
        .map(|f| (f.key.clone(), f.value.clone()))
}
