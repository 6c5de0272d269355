// src/services/catalog.rs

use crate::models::menu::{BusinessModel, MenuGroup, Resource, ResourceDescriptor, SubGroup};

// ---
// Tabela estática de recursos do menu
// ---
// O `match` é exaustivo: um recurso novo não compila sem o seu descritor.
pub const fn describe(resource: Resource) -> ResourceDescriptor {
    use BusinessModel::{Produto, Servico};
    use MenuGroup::*;

    let (title, path, icon, group, sub_group, business_model) = match resource {
        // Geral
        Resource::Dashboard => ("Dashboard", "/dashboard", "layout-dashboard", Geral, None, None),
        Resource::Empresas => ("Empresas", "/empresas", "building", Geral, None, None),
        Resource::Clientes => ("Clientes", "/clientes", "users", Geral, None, None),
        Resource::Usuarios => ("Usuarios", "/usuarios", "user-cog", Geral, None, None),
        Resource::Enderecos => ("Enderecos", "/enderecos", "map-pin", Geral, None, None),
        Resource::HorariosEmpresa => (
            "Horarios Empresa",
            "/horarios-empresa",
            "clock",
            Geral,
            None,
            None,
        ),

        // Produtos & Pedidos (apenas empresas de produto)
        Resource::Produtos => (
            "Produtos",
            "/produtos",
            "package",
            ProdutosPedidos,
            Some(SubGroup::Catalogo),
            Some(Produto),
        ),
        Resource::Categorias => (
            "Categorias",
            "/categorias",
            "tags",
            ProdutosPedidos,
            Some(SubGroup::Catalogo),
            Some(Produto),
        ),
        Resource::Pedidos => (
            "Pedidos",
            "/pedidos",
            "receipt",
            ProdutosPedidos,
            Some(SubGroup::Vendas),
            Some(Produto),
        ),
        Resource::ItensPedido => (
            "Itens do Pedido",
            "/itens-pedido",
            "list",
            ProdutosPedidos,
            Some(SubGroup::Vendas),
            Some(Produto),
        ),

        // Serviços & Agenda (apenas empresas de serviço)
        Resource::Servicos => (
            "Serviços",
            "/servicos",
            "briefcase",
            ServicosAgenda,
            None,
            Some(Servico),
        ),
        Resource::Profissionais => (
            "Profissionais",
            "/profissionais",
            "user-check",
            ServicosAgenda,
            None,
            Some(Servico),
        ),
        Resource::Agendamentos => (
            "Agendamentos",
            "/agendamentos",
            "calendar-check",
            ServicosAgenda,
            Some(SubGroup::Agenda),
            Some(Servico),
        ),
        Resource::HorariosProfissionais => (
            "Horarios Profissionais",
            "/horarios-profissionais",
            "calendar-clock",
            ServicosAgenda,
            Some(SubGroup::Agenda),
            Some(Servico),
        ),

        // Comunicação
        Resource::Chat => ("Chat", "/chat", "message-circle", Comunicacao, None, None),
        Resource::Whatsapp => ("WhatsApp", "/whatsapp", "smartphone", Comunicacao, None, None),

        // Configurações
        Resource::Permissoes => ("Permissões", "/permissoes", "shield", Configuracoes, None, None),
        Resource::Cargos => ("Cargos", "/cargos", "id-card", Configuracoes, None, None),
        Resource::Documentacao => (
            "Documentação",
            "/documentacao",
            "book-open",
            Configuracoes,
            None,
            None,
        ),
    };

    ResourceDescriptor {
        resource,
        title,
        path,
        icon,
        group,
        sub_group,
        business_model,
    }
}

/// Todos os descritores, na ordem em que aparecem no menu.
pub fn descriptors() -> impl Iterator<Item = ResourceDescriptor> {
    Resource::ALL.into_iter().map(describe)
}

/// Descritores visíveis para o modelo de negócio informado.
pub fn descriptors_for(model: Option<BusinessModel>) -> Vec<ResourceDescriptor> {
    descriptors().filter(|d| d.visible_under(model)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_resource_has_a_unique_path() {
        let paths: HashSet<_> = descriptors().map(|d| d.path).collect();
        assert_eq!(paths.len(), Resource::ALL.len());
    }

    #[test]
    fn restricted_groups_hold_only_restricted_resources() {
        for descriptor in descriptors() {
            match descriptor.group {
                MenuGroup::ProdutosPedidos => {
                    assert_eq!(descriptor.business_model, Some(BusinessModel::Produto))
                }
                MenuGroup::ServicosAgenda => {
                    assert_eq!(descriptor.business_model, Some(BusinessModel::Servico))
                }
                _ => assert_eq!(descriptor.business_model, None),
            }
        }
    }

    #[test]
    fn descriptors_for_filters_by_business_model() {
        let produto = descriptors_for(Some(BusinessModel::Produto));
        assert!(produto.iter().all(|d| d.business_model != Some(BusinessModel::Servico)));
        assert!(produto.iter().any(|d| d.resource == Resource::Pedidos));

        assert_eq!(descriptors_for(None).len(), Resource::ALL.len());
        assert_eq!(descriptors_for(Some(BusinessModel::Ambos)).len(), Resource::ALL.len());
    }
}
