// src/models/menu.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use thiserror::Error;

// ---
// 1. Modelo de Negócio da Empresa
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessModel {
    Produto,
    Servico,
    Ambos,
}

#[derive(Debug, Error)]
#[error("Modelo de negócio desconhecido: '{0}'")]
pub struct UnknownBusinessModel(pub String);

impl FromStr for BusinessModel {
    type Err = UnknownBusinessModel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "produto" => Ok(BusinessModel::Produto),
            "servico" | "serviço" => Ok(BusinessModel::Servico),
            "ambos" => Ok(BusinessModel::Ambos),
            _ => Err(UnknownBusinessModel(value.to_string())),
        }
    }
}

// ---
// 2. Papéis (Roles) fixos do sistema
// ---
// Apenas `Admin` ignora as permissões. Os demais dependem de `pode_visualizar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Gerente,
    Atendente,
    Profissional,
    Cliente,
}

impl Role {
    pub fn code(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Gerente => "gerente",
            Role::Atendente => "atendente",
            Role::Profissional => "profissional",
            Role::Cliente => "cliente",
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---
// 3. Permissão (vinda do Permission Store)
// ---
// Os nomes dos campos seguem as colunas da tabela `permissoes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Permission {
    pub recurso_codigo: String,
    pub pode_visualizar: bool,
    pub pode_criar: bool,
    pub pode_editar: bool,
    pub pode_excluir: bool,
}

impl Permission {
    /// Permissão somente de leitura.
    pub fn view_only(recurso_codigo: impl Into<String>) -> Self {
        Self {
            recurso_codigo: recurso_codigo.into(),
            pode_visualizar: true,
            pode_criar: false,
            pode_editar: false,
            pode_excluir: false,
        }
    }

    pub fn full_access(recurso_codigo: impl Into<String>) -> Self {
        Self {
            recurso_codigo: recurso_codigo.into(),
            pode_visualizar: true,
            pode_criar: true,
            pode_editar: true,
            pode_excluir: true,
        }
    }
}

// ---
// 4. Recursos (áreas funcionais da aplicação)
// ---
// A ordem das variantes é a ordem em que aparecem no menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Dashboard,
    Empresas,
    Clientes,
    Usuarios,
    Enderecos,
    HorariosEmpresa,
    Produtos,
    Categorias,
    Pedidos,
    ItensPedido,
    Servicos,
    Profissionais,
    Agendamentos,
    HorariosProfissionais,
    Chat,
    Whatsapp,
    Permissoes,
    Cargos,
    Documentacao,
}

impl Resource {
    pub const ALL: [Resource; 19] = [
        Resource::Dashboard,
        Resource::Empresas,
        Resource::Clientes,
        Resource::Usuarios,
        Resource::Enderecos,
        Resource::HorariosEmpresa,
        Resource::Produtos,
        Resource::Categorias,
        Resource::Pedidos,
        Resource::ItensPedido,
        Resource::Servicos,
        Resource::Profissionais,
        Resource::Agendamentos,
        Resource::HorariosProfissionais,
        Resource::Chat,
        Resource::Whatsapp,
        Resource::Permissoes,
        Resource::Cargos,
        Resource::Documentacao,
    ];

    /// O `recurso_codigo` usado pelo backend.
    pub fn code(self) -> &'static str {
        match self {
            Resource::Dashboard => "dashboard",
            Resource::Empresas => "empresas",
            Resource::Clientes => "clientes",
            Resource::Usuarios => "usuarios",
            Resource::Enderecos => "enderecos",
            Resource::HorariosEmpresa => "horarios_empresa",
            Resource::Produtos => "produtos",
            Resource::Categorias => "categorias",
            Resource::Pedidos => "pedidos",
            Resource::ItensPedido => "itens_pedido",
            Resource::Servicos => "servicos",
            Resource::Profissionais => "profissionais",
            Resource::Agendamentos => "agendamentos",
            Resource::HorariosProfissionais => "horarios_profissionais",
            Resource::Chat => "chat",
            Resource::Whatsapp => "whatsapp",
            Resource::Permissoes => "permissoes",
            Resource::Cargos => "cargos",
            Resource::Documentacao => "documentacao",
        }
    }

    pub fn from_code(code: &str) -> Option<Resource> {
        let code = code.trim();
        Resource::ALL.into_iter().find(|resource| resource.code() == code)
    }
}

// ---
// 5. Grupos e Sub-grupos do menu lateral
// ---
// A ordem das variantes define a prioridade de exibição (derive Ord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MenuGroup {
    #[serde(rename = "Geral")]
    Geral,
    #[serde(rename = "Produtos & Pedidos")]
    ProdutosPedidos,
    #[serde(rename = "Serviços & Agenda")]
    ServicosAgenda,
    #[serde(rename = "Comunicação")]
    Comunicacao,
    #[serde(rename = "Configurações")]
    Configuracoes,
}

impl MenuGroup {
    pub fn key(self) -> &'static str {
        match self {
            MenuGroup::Geral => "geral",
            MenuGroup::ProdutosPedidos => "produtos-pedidos",
            MenuGroup::ServicosAgenda => "servicos-agenda",
            MenuGroup::Comunicacao => "comunicacao",
            MenuGroup::Configuracoes => "configuracoes",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MenuGroup::Geral => "Geral",
            MenuGroup::ProdutosPedidos => "Produtos & Pedidos",
            MenuGroup::ServicosAgenda => "Serviços & Agenda",
            MenuGroup::Comunicacao => "Comunicação",
            MenuGroup::Configuracoes => "Configurações",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SubGroup {
    #[serde(rename = "Catálogo")]
    Catalogo,
    #[serde(rename = "Vendas")]
    Vendas,
    #[serde(rename = "Agenda")]
    Agenda,
}

impl SubGroup {
    pub fn key(self) -> &'static str {
        match self {
            SubGroup::Catalogo => "catalogo",
            SubGroup::Vendas => "vendas",
            SubGroup::Agenda => "agenda",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SubGroup::Catalogo => "Catálogo",
            SubGroup::Vendas => "Vendas",
            SubGroup::Agenda => "Agenda",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SubGroup::Catalogo => "package",
            SubGroup::Vendas => "shopping-cart",
            SubGroup::Agenda => "calendar",
        }
    }
}

// ---
// 6. Descritor estático de um recurso
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub resource: Resource,
    pub title: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
    pub group: MenuGroup,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_group: Option<SubGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_model: Option<BusinessModel>,
}

impl ResourceDescriptor {
    /// `Ambos` ou nenhuma empresa ativa liberam tudo (fail-open).
    pub fn visible_under(&self, active: Option<BusinessModel>) -> bool {
        match (self.business_model, active) {
            (None, _) | (_, None) | (_, Some(BusinessModel::Ambos)) => true,
            (Some(restriction), Some(model)) => restriction == model,
        }
    }
}

// ---
// 7. A árvore que o front-end renderiza
// ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub key: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavItem>>,
}

impl NavItem {
    pub fn leaf(descriptor: &ResourceDescriptor) -> Self {
        Self {
            key: descriptor.resource.code().to_string(),
            title: descriptor.title.to_string(),
            href: Some(descriptor.path.to_string()),
            icon: Some(descriptor.icon.to_string()),
            children: None,
        }
    }

    pub fn branch(sub_group: SubGroup, children: Vec<NavItem>) -> Self {
        Self {
            key: sub_group.key().to_string(),
            title: sub_group.title().to_string(),
            href: None,
            icon: Some(sub_group.icon().to_string()),
            children: Some(children),
        }
    }

    pub fn is_branch(&self) -> bool {
        self.children.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavGroup {
    pub key: String,
    pub title: String,
    pub items: Vec<NavItem>,
}

// Resposta do endpoint GET /api/menu
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_model: Option<BusinessModel>,
    pub groups: Vec<NavGroup>,
}
