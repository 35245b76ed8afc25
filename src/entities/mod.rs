//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod cart_item;
pub mod category;
pub mod compare_item;
pub mod message;
pub mod notification;
pub mod order;
pub mod order_item;
pub mod outfit;
pub mod profile;
pub mod review;
pub mod wishlist_item;

// Re-export specific types to avoid conflicts
pub use cart_item::{Column as CartItemColumn, Entity as CartItem, Model as CartItemModel};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use compare_item::{
    Column as CompareItemColumn, Entity as CompareItem, Model as CompareItemModel,
};
pub use message::{Column as MessageColumn, Entity as Message, Model as MessageModel};
pub use notification::{
    Column as NotificationColumn, Entity as Notification, Model as NotificationModel,
};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel, OrderStatus};
pub use order_item::{Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel};
pub use outfit::{Column as OutfitColumn, Entity as Outfit, Model as OutfitModel};
pub use profile::{Column as ProfileColumn, Entity as Profile, Model as ProfileModel};
pub use review::{Column as ReviewColumn, Entity as Review, Model as ReviewModel};
pub use wishlist_item::{
    Column as WishlistItemColumn, Entity as WishlistItem, Model as WishlistItemModel,
};
