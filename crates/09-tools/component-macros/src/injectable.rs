//! `#[derive(Injectable)]` 实现

use crate::utils::{extract_generic_type, field_has_attribute, to_snake_case};
use proc_macro2::{Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::{
    spanned::Spanned, Attribute, Data, DeriveInput, Error, ExprPath, Fields, Ident, Index,
    LitStr, Member, Result, Type,
};

/// 组件生命周期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyLifetime {
    Singleton,
    Scoped,
    Transient,
}

impl DependencyLifetime {
    fn from_name(name: &str, span: Span) -> Result<Self> {
        match name {
            "singleton" => Ok(Self::Singleton),
            "scoped" => Ok(Self::Scoped),
            "transient" => Ok(Self::Transient),
            other => Err(Error::new(
                span,
                format!("未知的生命周期: {}，可选值为 singleton、scoped、transient", other),
            )),
        }
    }

    fn path_tokens(self) -> TokenStream {
        match self {
            Self::Singleton => quote! { ::di_impl::Lifetime::Singleton },
            Self::Scoped => quote! { ::di_impl::Lifetime::Scoped },
            Self::Transient => quote! { ::di_impl::Lifetime::Transient },
        }
    }
}

/// 从结构体属性中解析出的参数
#[derive(Default)]
pub struct InjectableArgs {
    /// `#[dependency(..)]`，存在时生成自动注册代码
    pub dependency: Option<DependencyLifetime>,
    /// `#[injectable(constructor = "..")]`
    pub constructor: Option<ExprPath>,
}

impl InjectableArgs {
    pub fn from_attributes(attrs: &[Attribute]) -> Result<Self> {
        let mut args = Self::default();

        for attr in attrs {
            if attr.path().is_ident("dependency") {
                if args.dependency.is_some() {
                    return Err(Error::new(attr.span(), "重复的 #[dependency] 属性"));
                }
                args.dependency = Some(parse_dependency(attr)?);
            } else if attr.path().is_ident("injectable") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("constructor") {
                        let value: LitStr = meta.value()?.parse()?;
                        args.constructor = Some(value.parse()?);
                        Ok(())
                    } else {
                        Err(meta.error("未知的 injectable 参数，仅支持 constructor"))
                    }
                })?;
            }
        }

        Ok(args)
    }
}

/// 解析 `#[dependency]`、`#[dependency(scoped)]` 或 `#[dependency(lifetime = "scoped")]`
fn parse_dependency(attr: &Attribute) -> Result<DependencyLifetime> {
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(DependencyLifetime::Transient);
    }

    let mut lifetime = None;
    attr.parse_nested_meta(|meta| {
        let parsed = if meta.path.is_ident("lifetime") {
            let value: LitStr = meta.value()?.parse()?;
            DependencyLifetime::from_name(&value.value(), value.span())?
        } else {
            let name = meta
                .path
                .get_ident()
                .map(Ident::to_string)
                .unwrap_or_default();
            DependencyLifetime::from_name(&name, meta.path.span())?
        };
        if lifetime.replace(parsed).is_some() {
            return Err(meta.error("只能指定一个生命周期"));
        }
        Ok(())
    })?;

    Ok(lifetime.unwrap_or(DependencyLifetime::Transient))
}

/// 注入目标字段
struct InjectField {
    member: Member,
    name: String,
    dependency: Type,
}

fn collect_inject_fields(fields: &Fields) -> Result<Vec<InjectField>> {
    let mut targets = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        if !field_has_attribute(field, "inject") {
            continue;
        }
        let dependency = extract_generic_type(&field.ty).cloned().ok_or_else(|| {
            Error::new(field.ty.span(), "#[inject] 字段的类型必须是 Inject<T>")
        })?;
        let (member, name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.to_string()),
            None => (Member::Unnamed(Index::from(index)), index.to_string()),
        };
        targets.push(InjectField {
            member,
            name,
            dependency,
        });
    }
    Ok(targets)
}

fn default_constructor(fields: &Fields) -> TokenStream {
    let body = match fields {
        Fields::Named(named) => {
            let names = named.named.iter().map(|field| &field.ident);
            quote! { Self { #( #names: ::core::default::Default::default(), )* } }
        }
        Fields::Unnamed(unnamed) => {
            let values = unnamed
                .unnamed
                .iter()
                .map(|field| quote_spanned! { field.span() => ::core::default::Default::default() });
            quote! { Self( #( #values, )* ) }
        }
        Fields::Unit => quote! { Self },
    };

    quote! {
        args.expect_arity(0)?;
        ::core::result::Result::Ok(#body)
    }
}

/// 生成 `Injectable` 实现，带 `#[dependency]` 时附加自动注册函数
pub fn derive_injectable_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(Error::new(
                input.ident.span(),
                "#[derive(Injectable)] 只能用于结构体",
            ))
        }
    };

    let args = InjectableArgs::from_attributes(&input.attrs)?;
    let targets = collect_inject_fields(fields)?;

    let construct_body = match &args.constructor {
        Some(path) => quote! { #path(args) },
        None => default_constructor(fields),
    };

    let slots = targets.iter().map(|target| {
        let InjectField {
            member,
            name,
            dependency,
        } = target;
        quote! {
            ::di_impl::InjectionSlot::new::<#dependency>(
                #name,
                |this: &mut Self, dependency: ::std::sync::Arc<#dependency>| {
                    this.#member.inject(dependency)
                },
            )
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let injectable_impl = quote! {
        impl #impl_generics ::di_impl::Injectable for #struct_name #ty_generics #where_clause {
            fn construct(
                args: &::di_impl::Arguments,
            ) -> ::di_impl::ArgumentResult<Self> {
                #construct_body
            }

            fn injection_slots() -> ::std::vec::Vec<::di_impl::InjectionSlot<Self>> {
                ::std::vec![ #( #slots ),* ]
            }
        }
    };

    let registration_code = match args.dependency {
        Some(lifetime) => {
            if !input.generics.params.is_empty() {
                return Err(Error::new(
                    input.generics.span(),
                    "泛型组件不支持 #[dependency] 自动注册",
                ));
            }
            generate_registration_code(struct_name, lifetime)
        }
        None => TokenStream::new(),
    };

    Ok(quote! {
        #injectable_impl

        #registration_code
    })
}

/// 生成启动时向自动注册目录提交描述的函数
fn generate_registration_code(struct_name: &Ident, lifetime: DependencyLifetime) -> TokenStream {
    let registration_fn_name = Ident::new(
        &format!(
            "__register_dependency_{}",
            to_snake_case(&struct_name.to_string())
        ),
        Span::call_site(),
    );
    let lifetime = lifetime.path_tokens();

    quote! {
        #[::di_impl::__private::ctor::ctor]
        fn #registration_fn_name() {
            ::di_impl::submit_auto_registration(
                ::di_impl::AutoRegistration::of::<#struct_name>(::std::module_path!(), #lifetime),
            );
        }
    }
}
