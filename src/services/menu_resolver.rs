// src/services/menu_resolver.rs

use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use crate::{
    models::menu::{BusinessModel, MenuGroup, NavGroup, NavItem, Permission, Resource, Role},
    services::catalog,
};

pub const MY_COMPANY_KEY: &str = "minha-empresa";

/// Resultado completo da resolução, incluindo os códigos sem descritor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuResolution {
    pub groups: Vec<NavGroup>,
    pub unmapped: Vec<String>,
}

/// Monta o menu lateral para `(role, permissions, business_model)`.
///
/// Função pura: mesmas entradas, mesma árvore. `tenant_id` só é usado para o
/// atalho "Minha Empresa" do gerente.
pub fn resolve_menu(
    role: Role,
    permissions: &[Permission],
    business_model: Option<BusinessModel>,
    tenant_id: Option<Uuid>,
) -> Vec<NavGroup> {
    resolve_menu_detailed(role, permissions, business_model, tenant_id).groups
}

pub fn resolve_menu_detailed(
    role: Role,
    permissions: &[Permission],
    business_model: Option<BusinessModel>,
    tenant_id: Option<Uuid>,
) -> MenuResolution {
    // 1. Admin ignora as permissões (mas não o modelo de negócio)
    if role.is_admin() {
        return MenuResolution {
            groups: build_menu(|_| true, business_model, None),
            unmapped: Vec::new(),
        };
    }

    // 2. Demais papéis: só o que tiver `pode_visualizar`
    let (granted, unmapped) = granted_resources(permissions);

    // 3. Gerente com empresa sempre enxerga a própria empresa
    let own_company = match (role, tenant_id) {
        (Role::Gerente, Some(id)) => Some(id),
        _ => None,
    };

    MenuResolution {
        groups: build_menu(|resource| granted.contains(&resource), business_model, own_company),
        unmapped,
    }
}

/// O conjunto de permissões equivalente ao acesso total do admin.
pub fn admin_permissions(business_model: Option<BusinessModel>) -> Vec<Permission> {
    catalog::descriptors_for(business_model)
        .into_iter()
        .map(|d| Permission::full_access(d.resource.code()))
        .collect()
}

fn granted_resources(permissions: &[Permission]) -> (BTreeSet<Resource>, Vec<String>) {
    let mut granted = BTreeSet::new();
    let mut unmapped: Vec<String> = Vec::new();

    for permission in permissions.iter().filter(|p| p.pode_visualizar) {
        match Resource::from_code(&permission.recurso_codigo) {
            Some(resource) => {
                granted.insert(resource);
            }
            None if !unmapped.contains(&permission.recurso_codigo) => {
                tracing::warn!(
                    recurso = %permission.recurso_codigo,
                    "⚠️ Recurso sem descritor no menu, ignorado"
                );
                unmapped.push(permission.recurso_codigo.clone());
            }
            // Já avisado
            None => {}
        }
    }

    (granted, unmapped)
}

// Gerador único para admin e demais papéis; só o predicado muda.
fn build_menu<F>(
    is_visible: F,
    business_model: Option<BusinessModel>,
    own_company: Option<Uuid>,
) -> Vec<NavGroup>
where
    F: Fn(Resource) -> bool,
{
    // BTreeMap ordena os grupos pela prioridade declarada em MenuGroup
    let mut sections: BTreeMap<MenuGroup, Vec<NavItem>> = BTreeMap::new();

    for descriptor in catalog::descriptors() {
        if !is_visible(descriptor.resource) || !descriptor.visible_under(business_model) {
            continue;
        }

        let items = sections.entry(descriptor.group).or_default();
        let leaf = NavItem::leaf(&descriptor);

        match descriptor.sub_group {
            None => items.push(leaf),
            Some(sub_group) => {
                let existing = items
                    .iter_mut()
                    .find(|item| item.is_branch() && item.key == sub_group.key());

                match existing {
                    Some(branch) => branch.children.get_or_insert_with(Vec::new).push(leaf),
                    None => items.push(NavItem::branch(sub_group, vec![leaf])),
                }
            }
        }
    }

    if let Some(tenant_id) = own_company {
        let items = sections.entry(MenuGroup::Geral).or_default();
        // Logo depois do Dashboard, ou no topo se ele não estiver liberado
        let position = items
            .iter()
            .position(|item| item.key == Resource::Dashboard.code())
            .map_or(0, |index| index + 1);
        items.insert(position, my_company_item(tenant_id));
    }

    sections
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(group, items)| NavGroup {
            key: group.key().to_string(),
            title: group.title().to_string(),
            items,
        })
        .collect()
}

fn my_company_item(tenant_id: Uuid) -> NavItem {
    NavItem {
        key: MY_COMPANY_KEY.to_string(),
        title: "Minha Empresa".to_string(),
        href: Some(format!("/empresas/{tenant_id}/editar")),
        icon: Some("store".to_string()),
        children: None,
    }
}
