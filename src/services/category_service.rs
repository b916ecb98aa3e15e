// src/services/category_service.rs

use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{category_repo::duplicate_slug_error, CategoryRepository, ProductRepository},
    models::category::{Category, CategoryAdminRow, CategoryDetail, CategoryTree},
};

// Slug: minúsculas, sequências de espaço viram '-', o resto dos caracteres
// fora de [a-z0-9_-] é descartado.
pub fn slugify(name: &str) -> String {
    static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
    static INVALID: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_\-]").unwrap());

    let lowered = name.to_lowercase();
    let hyphenated = WHITESPACE.replace_all(lowered.trim(), "-");
    INVALID.replace_all(&hyphenated, "").into_owned()
}

// Normaliza o campo `parent` vindo do formulário: string vazia (ou só
// espaços) significa "sem pai"; qualquer outra coisa precisa ser um UUID.
pub fn normalize_parent(parent: Option<&str>) -> Result<Option<Uuid>, AppError> {
    match parent.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<Uuid>()
            .map(Some)
            .map_err(|_| AppError::BadRequest("Categoria pai inválida.".to_string())),
    }
}

#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
    product_repo: ProductRepository,
    pool: PgPool,
}

impl CategoryService {
    pub fn new(
        category_repo: CategoryRepository,
        product_repo: ProductRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            category_repo,
            product_repo,
            pool,
        }
    }

    pub async fn create(
        &self,
        name: &str,
        parent: Option<&str>,
        image: Option<&str>,
    ) -> Result<Category, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest(
                "O nome da categoria é obrigatório.".to_string(),
            ));
        }

        let parent_id = normalize_parent(parent)?;
        let slug = slugify(name);

        // Pré-checagem de unicidade de (slug, pai); o índice único do banco
        // cobre a corrida entre a checagem e o insert.
        if self
            .category_repo
            .find_duplicate_slug(&slug, parent_id, None)
            .await?
            .is_some()
        {
            return Err(duplicate_slug_error(parent_id));
        }

        if let Some(pid) = parent_id {
            self.category_repo.find_by_id(pid).await?.ok_or_else(|| {
                AppError::NotFound("Categoria pai não encontrada.".to_string())
            })?;
        }

        self.category_repo
            .insert(&self.pool, name, &slug, parent_id, image)
            .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        parent: Option<&str>,
        image: Option<&str>,
    ) -> Result<CategoryDetail, AppError> {
        let category = self
            .category_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Categoria não encontrada.".to_string()))?;

        // Ausência de `parent` no payload promove a categoria a principal,
        // como no painel (o formulário sempre envia o campo).
        let new_parent = normalize_parent(parent)?;
        if let Some(pid) = new_parent {
            if Some(pid) != category.parent_id {
                self.category_repo.find_by_id(pid).await?.ok_or_else(|| {
                    AppError::NotFound("Categoria pai não encontrada.".to_string())
                })?;
            }
        }

        let (new_name, new_slug) = match name.map(str::trim) {
            Some(n) if !n.is_empty() && n != category.name => {
                let slug = slugify(n);
                if self
                    .category_repo
                    .find_duplicate_slug(&slug, new_parent, Some(id))
                    .await?
                    .is_some()
                {
                    return Err(duplicate_slug_error(new_parent));
                }
                (n.to_string(), slug)
            }
            _ => (category.name.clone(), category.slug.clone()),
        };

        let new_image = image.map(str::to_string).or(category.image.clone());

        let updated = self
            .category_repo
            .update(
                &self.pool,
                id,
                &new_name,
                &new_slug,
                new_parent,
                new_image.as_deref(),
            )
            .await?;

        self.detail(updated).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let category = self
            .category_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Categoria não encontrada.".to_string()))?;

        // Produtos apontando para a categoria (ou para uma das filhas que
        // cairiam no cascade) bloqueiam a exclusão.
        let mut product_count = self.product_repo.count_by_category(id).await?;
        for child_id in self.category_repo.child_ids(id).await? {
            product_count += self.product_repo.count_by_category(child_id).await?;
        }
        if product_count > 0 {
            return Err(AppError::BadRequest(format!(
                "Não é possível excluir a categoria. {} produto(s) estão usando esta categoria.",
                product_count
            )));
        }

        // Cascade de um nível só: apaga as filhas diretas e depois a própria.
        let mut tx = self.pool.begin().await?;
        self.category_repo.delete_children(&mut *tx, id).await?;
        self.category_repo.delete(&mut *tx, category.id).await?;
        tx.commit().await?;

        Ok(())
    }

    // Modo admin: todas as categorias (principais + sub) com o nome do pai.
    pub async fn list_admin(&self) -> Result<Vec<CategoryAdminRow>, AppError> {
        self.category_repo.list_admin().await
    }

    // Modo público: só as principais, com as subcategorias populadas.
    pub async fn list_public(&self) -> Result<Vec<CategoryTree>, AppError> {
        let main = self.category_repo.list_main().await?;
        let ids: Vec<Uuid> = main.iter().map(|c| c.id).collect();
        let mut children = self.category_repo.list_children_of(&ids).await?;

        let mut trees: Vec<CategoryTree> = main
            .into_iter()
            .map(|category| CategoryTree {
                category,
                subcategories: Vec::new(),
            })
            .collect();

        // children já vem ordenado por nome; distribui preservando a ordem.
        for child in children.drain(..) {
            if let Some(parent_id) = child.parent_id {
                if let Some(tree) = trees.iter_mut().find(|t| t.category.id == parent_id) {
                    tree.subcategories.push(child);
                }
            }
        }

        Ok(trees)
    }

    pub async fn get(&self, id: Uuid) -> Result<CategoryDetail, AppError> {
        let category = self
            .category_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Categoria não encontrada.".to_string()))?;
        self.detail(category).await
    }

    async fn detail(&self, category: Category) -> Result<CategoryDetail, AppError> {
        let parent = match category.parent_id {
            Some(pid) => self.category_repo.find_by_id(pid).await?,
            None => None,
        };
        let subcategories = self.category_repo.list_children(category.id).await?;
        Ok(CategoryDetail {
            category,
            parent,
            subcategories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Camisetas"), "camisetas");
        assert_eq!(slugify("Roupas de Inverno"), "roupas-de-inverno");
    }

    #[test]
    fn slugify_collapses_whitespace_runs() {
        assert_eq!(slugify("Roupas   de \t Inverno"), "roupas-de-inverno");
    }

    #[test]
    fn slugify_strips_invalid_characters() {
        assert_eq!(slugify("Promoção!"), "promoo");
        assert_eq!(slugify("T-Shirts & Co."), "t-shirts-co");
        assert_eq!(slugify("under_score ok"), "under_score-ok");
    }

    #[test]
    fn normalize_parent_treats_empty_as_none() {
        assert_eq!(normalize_parent(None).unwrap(), None);
        assert_eq!(normalize_parent(Some("")).unwrap(), None);
        assert_eq!(normalize_parent(Some("   ")).unwrap(), None);
    }

    #[test]
    fn normalize_parent_parses_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(
            normalize_parent(Some(&id.to_string())).unwrap(),
            Some(id)
        );
    }

    #[test]
    fn normalize_parent_rejects_garbage() {
        assert!(normalize_parent(Some("not-a-uuid")).is_err());
    }
}
