pub mod post_comments;
pub mod posts;
pub mod profiles;
pub mod users;

pub use post_comments::Entity as PostComments;
pub use post_comments::Model as PostComment;
pub use posts::Entity as Posts;
pub use posts::Model as Post;
pub use profiles::Entity as Profiles;
pub use profiles::Model as Profile;
pub use users::Entity as Users;
pub use users::Model as User;
