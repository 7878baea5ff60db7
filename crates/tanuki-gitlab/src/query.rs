//! Query parameters for list endpoints.
//!
//! Each query knows how to turn itself into URL parameters. Empty or unset
//! filters are left out so GitLab applies its own defaults.

/// Sort key for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Name,
    LastActivityAt,
    UpdatedAt,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Name => "name",
            OrderBy::LastActivityAt => "last_activity_at",
            OrderBy::UpdatedAt => "updated_at",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Asc,
    Desc,
}

impl Sort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::Asc => "asc",
            Sort::Desc => "desc",
        }
    }
}

/// Project visibility level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Internal,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Internal => "internal",
            Visibility::Private => "private",
        }
    }
}

/// Pipeline status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    Created,
    Pending,
    Running,
    Success,
    Failed,
    Canceled,
}

impl PipelineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStatus::Created => "created",
            PipelineStatus::Pending => "pending",
            PipelineStatus::Running => "running",
            PipelineStatus::Success => "success",
            PipelineStatus::Failed => "failed",
            PipelineStatus::Canceled => "canceled",
        }
    }
}

/// URL parameters, in the order they are sent.
pub type Params = Vec<(&'static str, String)>;

fn push_flag(params: &mut Params, key: &'static str, set: bool) {
    if set {
        params.push((key, "true".to_string()));
    }
}

fn push_search(params: &mut Params, search: &str) {
    if !search.is_empty() {
        params.push(("search", search.to_string()));
    }
}

/// Filters for `GET /projects`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectQuery {
    pub search: String,
    pub membership: bool,
    pub starred: bool,
    pub visibility: Option<Visibility>,
    pub order_by: OrderBy,
    pub sort: Sort,
    /// Return the reduced project representation.
    pub simple: bool,
    pub page: u32,
    pub per_page: u32,
}

impl ProjectQuery {
    fn base(search: impl Into<String>, order_by: OrderBy, sort: Sort) -> Self {
        Self {
            search: search.into(),
            membership: false,
            starred: false,
            visibility: None,
            order_by,
            sort,
            simple: true,
            page: 1,
            per_page: 20,
        }
    }

    /// Projects the user is a member of, by name.
    pub fn member(search: impl Into<String>) -> Self {
        Self {
            membership: true,
            ..Self::base(search, OrderBy::Name, Sort::Asc)
        }
    }

    /// Public projects, most recently active first.
    pub fn public(search: impl Into<String>) -> Self {
        Self {
            visibility: Some(Visibility::Public),
            ..Self::base(search, OrderBy::LastActivityAt, Sort::Desc)
        }
    }

    /// Projects the user starred, most recently active first.
    pub fn starred(search: impl Into<String>) -> Self {
        Self {
            starred: true,
            ..Self::base(search, OrderBy::LastActivityAt, Sort::Desc)
        }
    }

    pub fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        push_search(&mut params, &self.search);
        push_flag(&mut params, "membership", self.membership);
        push_flag(&mut params, "starred", self.starred);
        if let Some(visibility) = self.visibility {
            params.push(("visibility", visibility.as_str().to_string()));
        }
        params.push(("order_by", self.order_by.as_str().to_string()));
        params.push(("sort", self.sort.as_str().to_string()));
        push_flag(&mut params, "simple", self.simple);
        params.push(("page", self.page.to_string()));
        params.push(("per_page", self.per_page.to_string()));
        params
    }
}

/// Filters for `GET /groups`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupQuery {
    pub search: String,
    pub archived: Option<bool>,
    pub order_by: OrderBy,
    pub sort: Sort,
    pub page: u32,
    pub per_page: u32,
}

impl GroupQuery {
    /// Non-archived groups by name.
    pub fn active(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            archived: Some(false),
            order_by: OrderBy::Name,
            sort: Sort::Asc,
            page: 1,
            per_page: 20,
        }
    }

    pub fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        push_search(&mut params, &self.search);
        if let Some(archived) = self.archived {
            params.push(("archived", archived.to_string()));
        }
        params.push(("order_by", self.order_by.as_str().to_string()));
        params.push(("sort", self.sort.as_str().to_string()));
        params.push(("page", self.page.to_string()));
        params.push(("per_page", self.per_page.to_string()));
        params
    }
}

/// Filters for `GET /projects/:id/pipelines`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineQuery {
    pub status: Option<PipelineStatus>,
    pub order_by: OrderBy,
}

impl PipelineQuery {
    /// Running pipelines, most recently updated first.
    pub fn running() -> Self {
        Self {
            status: Some(PipelineStatus::Running),
            order_by: OrderBy::UpdatedAt,
        }
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        params.push(("order_by", self.order_by.as_str().to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_member_query_params() {
        let params = ProjectQuery::member("tan").with_page(1, 10).to_params();

        assert_eq!(param(&params, "search"), Some("tan"));
        assert_eq!(param(&params, "membership"), Some("true"));
        assert_eq!(param(&params, "starred"), None);
        assert_eq!(param(&params, "visibility"), None);
        assert_eq!(param(&params, "order_by"), Some("name"));
        assert_eq!(param(&params, "sort"), Some("asc"));
        assert_eq!(param(&params, "simple"), Some("true"));
        assert_eq!(param(&params, "per_page"), Some("10"));
    }

    #[test]
    fn test_public_and_starred_sort_by_activity() {
        let public = ProjectQuery::public("x").to_params();
        assert_eq!(param(&public, "visibility"), Some("public"));
        assert_eq!(param(&public, "membership"), None);
        assert_eq!(param(&public, "order_by"), Some("last_activity_at"));
        assert_eq!(param(&public, "sort"), Some("desc"));

        let starred = ProjectQuery::starred("x").to_params();
        assert_eq!(param(&starred, "starred"), Some("true"));
        assert_eq!(param(&starred, "visibility"), None);
        assert_eq!(param(&starred, "order_by"), Some("last_activity_at"));
    }

    #[test]
    fn test_empty_search_omitted() {
        let params = ProjectQuery::member("").to_params();
        assert_eq!(param(&params, "search"), None);
    }

    #[test]
    fn test_search_kept_verbatim() {
        let params = GroupQuery::active(" test").to_params();
        assert_eq!(param(&params, "search"), Some(" test"));
        assert_eq!(param(&params, "archived"), Some("false"));
        assert_eq!(param(&params, "order_by"), Some("name"));
    }

    #[test]
    fn test_running_pipelines() {
        let params = PipelineQuery::running().to_params();
        assert_eq!(param(&params, "status"), Some("running"));
        assert_eq!(param(&params, "order_by"), Some("updated_at"));
    }
}
